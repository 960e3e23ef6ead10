// src/banner.rs

/// Prints the application startup banner to the console.
pub fn print_banner() {
    let banner = r#"
       _                 _
   ___| | __ _ _   _  __| | ___   ___  ___ _ ____   _____ _ __
  / __| |/ _` | | | |/ _` |/ _ \ / __|/ _ \ '__\ \ / / _ \ '__|
 | (__| | (_| | |_| | (_| |  __/ \__ \  __/ |   \ V /  __/ |
  \___|_|\__,_|\__,_|\__,_|\___| |___/\___|_|    \_/ \___|_|

    Prompt-to-CLI relay
"#;
    println!("{}", banner);
}
