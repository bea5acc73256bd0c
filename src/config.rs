#[derive(Debug, PartialEq)]
pub struct Config {
    /// One or more `.obj` paths, loaded (and executed from) in this order.
    pub files: Vec<String>,
    pub debug: bool,
}

impl Config {
    pub fn new(files: Vec<String>, debug: bool) -> Self {
        Self { files, debug }
    }
}
