// Command joining and quoting for the scripts handed to terminals.
//
// Best effort only: these keep a path or command from closing the string it
// is interpolated into. They are not a defense against hostile input; all
// input is assumed to come from the local user.

/// Chain commands so each runs only if the previous one succeeded
///
/// Blank entries are dropped. An empty result means "just open a shell".
pub fn join_commands(commands: &[String]) -> String {
    commands
        .iter()
        .map(|c| c.trim())
        .filter(|c| !c.is_empty())
        .collect::<Vec<_>>()
        .join(" && ")
}

/// Wrap in POSIX single quotes
pub fn single_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

/// Escape for use inside POSIX double quotes
pub fn double_quote_escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        if matches!(ch, '\\' | '"' | '$' | '`') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

/// Escape for an AppleScript string literal
pub fn applescript_escape(value: &str) -> String {
    value.replace('\\', r"\\").replace('"', r#"\""#)
}

/// Escape a path for `cd /d "..."` in cmd.exe
///
/// Windows paths cannot contain `"`, so any that show up are dropped.
pub fn cmd_path_escape(value: &str) -> String {
    value.replace('"', "")
}

/// `cd` into `dir`, run the chain, then stay in an interactive bash
pub fn posix_keep_open_script(dir: &str, command_line: &str) -> String {
    if command_line.is_empty() {
        format!("cd {}; exec bash", single_quote(dir))
    } else {
        format!("cd {} && {}; exec bash", single_quote(dir), command_line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_join_commands() {
        assert_eq!(
            join_commands(&strings(&["npm i", "npm run dev"])),
            "npm i && npm run dev"
        );
        assert_eq!(join_commands(&strings(&["  make  ", "", "   "])), "make");
        assert_eq!(join_commands(&[]), "");
    }

    #[test]
    fn test_single_quote() {
        assert_eq!(single_quote("/home/me/app"), "'/home/me/app'");
        assert_eq!(single_quote("it's"), r"'it'\''s'");
    }

    #[test]
    fn test_double_quote_escape() {
        assert_eq!(double_quote_escape(r#"a "b" $HOME `x` \"#), r#"a \"b\" \$HOME \`x\` \\"#);
    }

    #[test]
    fn test_applescript_escape() {
        assert_eq!(applescript_escape(r#"echo "hi" \n"#), r#"echo \"hi\" \\n"#);
    }

    #[test]
    fn test_cmd_path_escape() {
        assert_eq!(cmd_path_escape(r#"C:\Work\"odd""#), r"C:\Work\odd");
    }

    #[test]
    fn test_posix_keep_open_script() {
        assert_eq!(
            posix_keep_open_script("/srv/app", "make && make run"),
            "cd '/srv/app' && make && make run; exec bash"
        );
        assert_eq!(posix_keep_open_script("/srv/app", ""), "cd '/srv/app'; exec bash");
    }
}
