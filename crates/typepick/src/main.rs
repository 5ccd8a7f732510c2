//! typepick - Swagger / OpenAPI schema definitions to TypeScript interfaces

use std::process::ExitCode;

fn main() -> ExitCode {
    typepick_cli::init_tracing();
    let code = typepick_cli::run_cli(std::env::args().collect());
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}
