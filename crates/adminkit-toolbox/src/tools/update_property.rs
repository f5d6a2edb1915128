use std::io::{self, Write};
use std::path::PathBuf;

use adminkit::{CombineMode, ToolsConfig, UpdateRequest, update_property};

const USAGE: &str = "\
Usage: update_property [-d <delimiter>] [-a|-p] [-e] [-f] [-q] <file> <key> <value>
  -d <delim>  key/value delimiter (default '=')
  -a          append value to the existing value
  -p          prepend value to the existing value (wins over -a)
  -e          print the resulting line
  -f          add the key at the end of the file if it is missing
  -q          wrap the value in double quotes";

struct Invocation {
    file: PathBuf,
    request: UpdateRequest,
}

pub fn run(args: &[String], config: &ToolsConfig) -> i32 {
    let invocation = match parse_args(args, config) {
        Ok(Some(invocation)) => invocation,
        Ok(None) => {
            println!("{USAGE}");
            return 0;
        }
        Err(msg) => {
            eprintln!("update_property: {msg}");
            eprintln!("{USAGE}");
            return 1;
        }
    };

    match update_property(&invocation.file, &invocation.request) {
        Ok(updated) => {
            if invocation.request.echo {
                let mut out = io::stdout().lock();
                let echoed = out
                    .write_all(&updated.bytes)
                    .and_then(|()| out.write_all(b"\n"));
                if let Err(e) = echoed {
                    eprintln!("update_property: {e}");
                    return 1;
                }
            }
            0
        }
        Err(e) => {
            eprintln!("update_property: {e}");
            1
        }
    }
}

/// Parse getopts-style: options stop at the first positional argument.
fn parse_args(args: &[String], config: &ToolsConfig) -> Result<Option<Invocation>, String> {
    let mut delimiter = config.default_delimiter;
    let mut append = false;
    let mut prepend = false;
    let mut echo = false;
    let mut force = false;
    let mut quote = false;
    let mut positional: Vec<String> = Vec::new();

    let mut i = 0;
    while i < args.len() {
        let arg = &args[i];
        if !positional.is_empty() || !arg.starts_with('-') || arg == "-" {
            positional.push(arg.clone());
            i += 1;
            continue;
        }
        if arg == "--" {
            positional.extend(args[i + 1..].iter().cloned());
            break;
        }
        if arg == "-h" || arg == "--help" {
            return Ok(None);
        }

        // Combined flags like -fq, and -d with an attached value like -d:
        for (pos, ch) in arg.char_indices().skip(1) {
            match ch {
                'a' => append = true,
                'p' => prepend = true,
                'e' => echo = true,
                'f' => force = true,
                'q' => quote = true,
                'd' => {
                    let attached = &arg[pos + ch.len_utf8()..];
                    let value = if attached.is_empty() {
                        i += 1;
                        args.get(i)
                            .ok_or("option requires an argument -- 'd'")?
                            .as_str()
                    } else {
                        attached
                    };
                    delimiter = parse_delimiter(value)?;
                    break;
                }
                _ => return Err(format!("invalid option -- '{ch}'")),
            }
        }
        i += 1;
    }

    let [file, key, value]: [String; 3] = positional.try_into().map_err(|p: Vec<String>| {
        if p.len() < 3 {
            "missing operand".to_string()
        } else {
            format!("extra operand '{}'", p[3])
        }
    })?;
    if key.is_empty() {
        return Err("key must not be empty".into());
    }

    let request = UpdateRequest::new(key, value)
        .delimiter(delimiter)
        .combine(CombineMode::from_flags(append, prepend))
        .quote(quote)
        .force_insert(force)
        .echo(echo);

    Ok(Some(Invocation {
        file: PathBuf::from(file),
        request,
    }))
}

fn parse_delimiter(value: &str) -> Result<char, String> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c != '\n' => Ok(c),
        _ => Err(format!("delimiter must be a single character, got '{value}'")),
    }
}
