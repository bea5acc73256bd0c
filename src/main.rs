use clap::{App, Arg};
use lc3::Config;
use std::process;

fn main() {
    env_logger::init();

    let matches = App::new("LC-3 VM")
        .arg(
            Arg::with_name("debug")
                .short("d")
                .long("debug")
                .help("Runs in debug mode"),
        )
        .arg(
            Arg::with_name("PROGRAM")
                .help("One or more .obj files to load, in order.")
                .required(true)
                .multiple(true)
                .index(1),
        )
        .get_matches();

    let files = matches
        .values_of("PROGRAM")
        .unwrap()
        .map(str::to_string)
        .collect();

    let config = Config::new(files, matches.is_present("debug"));

    if let Err(e) = lc3::run(config) {
        log::error!("{}", e);
        process::exit(1);
    }
}
