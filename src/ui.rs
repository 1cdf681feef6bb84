use owo_colors::OwoColorize;

#[derive(Clone, Copy, Debug)]
pub enum Level {
    Info,
    Success,
    Warning,
    Error,
}

pub fn info(msg: impl AsRef<str>) {
    print_line(Level::Info, msg.as_ref());
}

pub fn success(msg: impl AsRef<str>) {
    print_line(Level::Success, msg.as_ref());
}

pub fn warning(msg: impl AsRef<str>) {
    print_line(Level::Warning, msg.as_ref());
}

pub fn error(msg: impl AsRef<str>) {
    print_line(Level::Error, msg.as_ref());
}

/// Colors only when stdout is a TTY, so redirected output stays clean.
pub fn print_line(level: Level, msg: &str) {
    let color = atty::is(atty::Stream::Stdout);

    if color {
        match level {
            Level::Info => println!("{}", msg),
            Level::Success => println!("{}", msg.green()),
            Level::Warning => println!("{}", msg.yellow()),
            Level::Error => println!("{}", msg.red()),
        }
    } else {
        println!("{}", msg);
    }
}
