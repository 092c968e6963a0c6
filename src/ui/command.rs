use crate::domain::discussion::Discussion;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Register {
        identifier: String,
        display_name: String,
    },
    Login {
        identifier: String,
    },
    Logout,
    WhoAmI,
    List,
    New {
        title: String,
    },
    Open {
        target: String,
    },
    Delete {
        target: String,
    },
    Help,
    Quit,
    /// Plain text for the open discussion.
    Send {
        text: String,
    },
    Empty,
    Invalid {
        usage: &'static str,
    },
    Unknown {
        name: String,
    },
}

pub fn parse_command(line: &str) -> ShellCommand {
    let line = line.trim();
    if line.is_empty() {
        return ShellCommand::Empty;
    }

    let Some(rest) = line.strip_prefix('/') else {
        return ShellCommand::Send {
            text: line.to_owned(),
        };
    };

    let (name, args) = rest
        .split_once(char::is_whitespace)
        .map(|(name, args)| (name, args.trim()))
        .unwrap_or((rest, ""));

    match name {
        "register" => match args.split_once(char::is_whitespace) {
            Some((identifier, display_name)) => ShellCommand::Register {
                identifier: identifier.to_owned(),
                display_name: display_name.trim().to_owned(),
            },
            None => ShellCommand::Invalid {
                usage: "/register <login> <pseudo>",
            },
        },
        "login" => match single_word(args) {
            Some(identifier) => ShellCommand::Login { identifier },
            None => ShellCommand::Invalid {
                usage: "/login <login>",
            },
        },
        "logout" => ShellCommand::Logout,
        "whoami" => ShellCommand::WhoAmI,
        "list" | "ls" => ShellCommand::List,
        "new" if !args.is_empty() => ShellCommand::New {
            title: args.to_owned(),
        },
        "new" => ShellCommand::Invalid {
            usage: "/new <title>",
        },
        "open" => match single_word(args) {
            Some(target) => ShellCommand::Open { target },
            None => ShellCommand::Invalid {
                usage: "/open <number|id>",
            },
        },
        "delete" | "rm" => match single_word(args) {
            Some(target) => ShellCommand::Delete { target },
            None => ShellCommand::Invalid {
                usage: "/delete <number|id>",
            },
        },
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" | "q" => ShellCommand::Quit,
        other => ShellCommand::Unknown {
            name: other.to_owned(),
        },
    }
}

/// Finds a discussion by its 1-based position in the list or by id.
pub fn resolve_discussion<'a>(
    discussions: &'a [Discussion],
    target: &str,
) -> Option<&'a Discussion> {
    match target.parse::<usize>() {
        Ok(position) if position >= 1 => discussions.get(position - 1),
        _ => discussions.iter().find(|discussion| discussion.id == target),
    }
}

fn single_word(args: &str) -> Option<String> {
    (!args.is_empty() && !args.contains(char::is_whitespace)).then(|| args.to_owned())
}
