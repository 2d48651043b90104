fn main() {
    if handle_cli_flags() {
        return;
    }

    if let Err(err) = vidstash::run() {
        eprintln!("error: {err:?}");
        std::process::exit(1);
    }
}

fn handle_cli_flags() -> bool {
    let mut saw_flag = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--version" | "-V" => {
                println!("vidstash {}", vidstash::VERSION);
                saw_flag = true;
            }
            "--help" | "-h" => {
                println!(
                    "vidstash — search videos and keep a watch-later shelf in the terminal.\n\n  --version, -V        Show version and exit\n  --help,    -h        Show this help message\n  --set-api-key KEY    Store the API key in the config file and exit"
                );
                saw_flag = true;
            }
            _ => {}
        }
    }
    if !saw_flag {
        if let Some(key) = api_key_arg() {
            saw_flag = true;
            match vidstash::config::save_api_key(None, &key) {
                Ok(path) => println!("API key saved to {}", path.display()),
                Err(err) => {
                    eprintln!("Failed to save API key: {err:?}");
                    std::process::exit(1);
                }
            }
        }
    }
    saw_flag
}

fn api_key_arg() -> Option<String> {
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--set-api-key" {
            return args.next();
        }
    }
    None
}
