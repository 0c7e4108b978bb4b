// src/banner.rs
// The banner goes to stderr: stdout is reserved for subdomains.

pub const VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"));

const BANNER: &str = r"
                                 __             _ __
  ____ _____  ___  _  __       / /__________ _(_) /____
 / __ `/ __ \/ _ \| |/_/______/ __/ ___/ __ `/ / / ___/
/ /_/ / /_/ /  __/>  </_____/ /_/ /  / /_/ / / (__  )
\__,_/ .___/\___/_/|_|      \__/_/   \__,_/_/_/____/
    /_/
";

pub fn version_line() -> String {
    format!("Current apex-trails version {}", VERSION)
}

pub fn print_banner() {
    eprintln!("{}\n{:>60}\n", BANNER, version_line());
}

pub fn print_version() {
    println!("{}", version_line());
}
