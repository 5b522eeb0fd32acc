use std::io::Write;

/// Initializes env_logger. Records are printed as `LEVEL: [Target] message`
/// where the target is the name of the generator that emitted them.
pub fn init_logger(verbose: bool) {
    env_logger::Builder::new()
        .filter_level(if verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .format(|buf, record| {
            writeln!(buf, "{}: [{}] {}", record.level(), record.target(), record.args())
        })
        .init();
}
