use std::path::PathBuf;
use std::process::ExitCode;

use rocks_lang::Rocks;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();

    match args.as_slice() {
        [] => {
            Rocks::new().run_prompt();
            ExitCode::SUCCESS
        }
        [script] => {
            let code = Rocks::new().run_file(&PathBuf::from(script));
            ExitCode::from(code)
        }
        _ => {
            eprintln!("Usage: rocks [script]");
            ExitCode::from(64)
        }
    }
}
