mod cli;
mod commands;

use std::process::ExitCode;

use cli::{
    CRunParams, CompileParams, DumpParams, RunParams, SymbolsParams, build_cli, usage_exit_code,
};

fn main() -> ExitCode {
    let matches = match build_cli().try_get_matches() {
        Ok(matches) => matches,
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(usage_exit_code(e.kind()));
        }
    };

    let mut stdout = std::io::stdout().lock();
    let result = match matches.subcommand() {
        Some(("compile", m)) => {
            let params = CompileParams::from_matches(m);
            commands::compile::run(params.into())
        }
        Some(("run", m)) => {
            let params = RunParams::from_matches(m);
            commands::run::run(params.into(), &mut stdout)
        }
        Some(("cRun", m)) => {
            let params = CRunParams::from_matches(m);
            commands::c_run::run(params.into(), &mut stdout)
        }
        Some(("dump", m)) => {
            let params = DumpParams::from_matches(m);
            commands::dump::run(params.into(), &mut stdout)
        }
        Some(("symbols", m)) => {
            let params = SymbolsParams::from_matches(m);
            commands::symbols::run(params.into(), &mut stdout)
        }
        _ => unreachable!("clap should have caught this"),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            e.report();
            ExitCode::from(e.exit_code())
        }
    }
}
