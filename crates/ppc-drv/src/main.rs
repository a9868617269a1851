use std::process::ExitCode;

fn main() -> ExitCode {
    ppc_drv::run()
}
