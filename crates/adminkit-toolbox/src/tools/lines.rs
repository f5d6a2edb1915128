use std::fs;
use std::io::{self, Read};

use adminkit::lines::{LineRange, extract_lines};

const USAGE: &str = "Usage: lines [-n] <start>[,<end>] [file]";

pub fn run(args: &[String]) -> i32 {
    let mut numbered = false;
    let mut operands: Vec<&str> = Vec::new();

    for arg in args {
        match arg.as_str() {
            "-n" if operands.is_empty() => numbered = true,
            "-h" | "--help" if operands.is_empty() => {
                println!("{USAGE}");
                return 0;
            }
            _ => operands.push(arg),
        }
    }

    let (range, file) = match operands.as_slice() {
        [range] => (*range, None),
        [range, file] => (*range, Some(*file)),
        _ => {
            eprintln!("{USAGE}");
            return 1;
        }
    };

    let range: LineRange = match range.parse() {
        Ok(r) => r,
        Err(e) => {
            eprintln!("lines: {e}");
            return 1;
        }
    };

    let text = match file {
        None | Some("-") => {
            let mut buf = String::new();
            if let Err(e) = io::stdin().read_to_string(&mut buf) {
                eprintln!("lines: {e}");
                return 1;
            }
            buf
        }
        Some(path) => match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                eprintln!("lines: {path}: {e}");
                return 1;
            }
        },
    };

    for line in extract_lines(&text, &range) {
        if numbered {
            println!("{}:{}", line.number, line.text);
        } else {
            println!("{}", line.text);
        }
    }

    0
}
