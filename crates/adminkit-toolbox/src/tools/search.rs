use std::collections::BTreeSet;

use adminkit::ToolsConfig;
use adminkit::search::{SearchOptions, search};

const USAGE: &str = "Usage: search [-i] [-F] [-l] [-n] [--include <glob>] <pattern> [path...]";

pub fn run(args: &[String], config: &ToolsConfig) -> i32 {
    let mut options = SearchOptions::from(&config.search);
    let mut line_numbers = false;
    let mut files_with_matches = false;
    let mut pattern: Option<String> = None;
    let mut paths: Vec<String> = Vec::new();
    let mut options_done = false;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            arg if options_done => {
                if pattern.is_none() {
                    pattern = Some(arg.to_string());
                } else {
                    paths.push(arg.to_string());
                }
            }
            "--" => options_done = true,
            "--include" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("search: option '--include' requires an argument");
                    return 2;
                }
                options.include = Some(args[i].clone());
            }
            "-h" | "--help" => {
                println!("{USAGE}");
                return 0;
            }
            arg if arg.starts_with('-') && arg.len() > 1 && pattern.is_none() => {
                // Handle combined flags like -in, -il
                for ch in arg[1..].chars() {
                    match ch {
                        'i' => options.case_insensitive = true,
                        'F' => options.fixed_strings = true,
                        'l' => files_with_matches = true,
                        'n' => line_numbers = true,
                        _ => {
                            eprintln!("search: invalid option -- '{ch}'");
                            eprintln!("{USAGE}");
                            return 2;
                        }
                    }
                }
            }
            _ => {
                if pattern.is_none() {
                    pattern = Some(args[i].clone());
                } else {
                    paths.push(args[i].clone());
                }
            }
        }
        i += 1;
    }

    let Some(pattern) = pattern else {
        eprintln!("search: missing pattern");
        eprintln!("{USAGE}");
        return 2;
    };

    if paths.is_empty() {
        paths.push(".".to_string());
    }

    let hits = match search(&pattern, &paths, &options) {
        Ok(hits) => hits,
        Err(e) => {
            eprintln!("search: {e}");
            return 2;
        }
    };

    if files_with_matches {
        let mut printed = BTreeSet::new();
        for hit in &hits {
            if printed.insert(&hit.path) {
                println!("{}", hit.path.display());
            }
        }
    } else {
        for hit in &hits {
            if line_numbers {
                println!("{}:{}:{}", hit.path.display(), hit.line_number, hit.line);
            } else {
                println!("{}:{}", hit.path.display(), hit.line);
            }
        }
    }

    if hits.is_empty() { 1 } else { 0 }
}
