use chrono::{TimeZone, Utc};

pub fn run() {
    let build_time_raw = option_env!("BUILD_TIME").unwrap_or("unknown");
    let build_time = build_time_raw
        .parse::<i64>()
        .ok()
        .and_then(|epoch| Utc.timestamp_opt(epoch, 0).single())
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| build_time_raw.to_string());

    println!("twse {}", env!("CARGO_PKG_VERSION"));
    println!("Branch:     {}", option_env!("GIT_BRANCH").unwrap_or("unknown"));
    println!("Tag:        {}", option_env!("GIT_TAG").unwrap_or("unknown"));
    println!("Commit:     {}", option_env!("GIT_HASH").unwrap_or("unknown"));
    println!("Build Time: {}", build_time);
    println!("Rustc:      {}", option_env!("RUSTC_VERSION").unwrap_or("unknown"));
    println!("OS:         {}", option_env!("TARGET_OS").unwrap_or("unknown"));
}
