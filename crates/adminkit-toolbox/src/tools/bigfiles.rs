use adminkit::ToolsConfig;
use adminkit::bigfiles::{BigFilesOptions, find_big_files};
use adminkit::fs::{human_size, parse_size};

const USAGE: &str = "Usage: bigfiles [-n count] [-s min_size] [-b] [path...]";

pub fn run(args: &[String], config: &ToolsConfig) -> i32 {
    let mut options = BigFilesOptions::from(&config.bigfiles);
    let mut bytes = false;
    let mut paths: Vec<String> = Vec::new();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-n" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("bigfiles: option requires an argument -- 'n'");
                    return 1;
                }
                match args[i].parse() {
                    Ok(n) => options.limit = n,
                    Err(_) => {
                        eprintln!("bigfiles: invalid count: '{}'", args[i]);
                        return 1;
                    }
                }
            }
            "-s" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("bigfiles: option requires an argument -- 's'");
                    return 1;
                }
                match parse_size(&args[i]) {
                    Some(size) => options.min_size = size,
                    None => {
                        eprintln!("bigfiles: invalid size: '{}'", args[i]);
                        return 1;
                    }
                }
            }
            "-b" => bytes = true,
            "-h" | "--help" => {
                println!("{USAGE}");
                return 0;
            }
            arg if arg.starts_with('-') && arg.len() > 1 => {
                eprintln!("bigfiles: invalid option -- '{arg}'");
                eprintln!("{USAGE}");
                return 1;
            }
            _ => paths.push(args[i].clone()),
        }
        i += 1;
    }

    if paths.is_empty() {
        paths.push(".".to_string());
    }

    match find_big_files(&paths, &options) {
        Ok(files) => {
            for file in files {
                let size = if bytes {
                    file.size.to_string()
                } else {
                    human_size(file.size)
                };
                println!("{}\t{}", size, file.path.display());
            }
            0
        }
        Err(e) => {
            eprintln!("bigfiles: {e}");
            1
        }
    }
}
