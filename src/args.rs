/// Startup options, parsed once and immutable afterwards.
///
/// `port` stays a string until the listener binds it; a non-numeric
/// value fails at bind time, not here.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Options {
    pub host: String,
    pub port: String,
    pub app: String,
    pub index: String,
    pub help: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            host: "localhost".to_string(),
            port: "8888".to_string(),
            app: String::new(),
            index: "index.html".to_string(),
            help: false,
        }
    }
}

pub struct OptionSpec {
    pub name: &'static str,
    pub synonym: &'static str,
    pub description: &'static str,
}

pub const OPTIONS: &[OptionSpec] = &[
    OptionSpec {
        name: "host",
        synonym: "h",
        description: "Host name for server",
    },
    OptionSpec {
        name: "port",
        synonym: "p",
        description: "Port number to listen",
    },
    OptionSpec {
        name: "app",
        synonym: "a",
        description: "App directory name to run",
    },
    OptionSpec {
        name: "index",
        synonym: "i",
        description: "Index file. e.g.) index.html",
    },
];

/// Parses command line arguments into [`Options`].
///
/// Accepts `--name=value` and `-synonym=value` forms; keys are matched
/// case-insensitively against [`OPTIONS`]. Unrecognized keys and
/// arguments without a `=` are ignored. The literal `-h` / `--help`
/// set the help flag, so `host` is only reachable through `-h=value`.
pub fn parse(args: impl IntoIterator<Item = String>) -> Options {
    let mut options = Options::default();

    for arg in args {
        set_option(&mut options, &arg);
    }

    options
}

fn set_option(options: &mut Options, arg: &str) {
    if arg == "-h" || arg == "--help" {
        options.help = true;
        return;
    }

    let Some((key, value)) = arg.split_once('=') else {
        return;
    };
    let key = key.trim_start_matches('-').to_lowercase();

    for opt in OPTIONS {
        if key == opt.name || key == opt.synonym {
            match opt.name {
                "host" => options.host = value.to_string(),
                "port" => options.port = value.to_string(),
                "app" => options.app = value.to_string(),
                "index" => options.index = value.to_string(),
                _ => {}
            }
        }
    }
}

pub fn print_help() {
    for opt in OPTIONS {
        println!("\t--{}\t\t{}", opt.name, opt.description);
    }
}
