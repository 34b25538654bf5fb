use reqstash::status::ExitStatus;

/// Entry point - hands the raw arguments to core::run()
///
/// Returns ExitStatus directly, which implements std::process::Termination.
fn main() -> ExitStatus {
    let args: Vec<String> = std::env::args().collect();
    reqstash::core::run(args)
}
