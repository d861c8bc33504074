//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `clinic_core` linkage.
//! - Resolve one legal-matter breadcrumb from a catalog JSON export.
//!
//! Usage: `clinic_cli [<catalog.json> <id>]`

use clinic_core::{CatalogService, JsonCatalogSource};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("clinic_core ping={}", clinic_core::ping());
    println!("clinic_core version={}", clinic_core::core_version());

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.as_slice() {
        [] => ExitCode::SUCCESS,
        [catalog_path, id] => resolve(catalog_path, id),
        _ => {
            eprintln!("usage: clinic_cli [<catalog.json> <id>]");
            ExitCode::from(2)
        }
    }
}

fn resolve(catalog_path: &str, raw_id: &str) -> ExitCode {
    let id = match raw_id.trim().parse::<i64>() {
        Ok(id) => id,
        Err(err) => {
            eprintln!("invalid catalog id `{raw_id}`: {err}");
            return ExitCode::from(2);
        }
    };

    let mut service = CatalogService::new(JsonCatalogSource::new(catalog_path));
    let labels = service
        .legal_matter_label(id)
        .and_then(|path| service.materia_label(id).map(|materia| (path, materia)));
    match labels {
        Ok((path, materia)) => {
            println!("materia={materia}");
            println!("ambito={path}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
