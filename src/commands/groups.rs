use crate::config::Config;
use crate::error::Result;

pub fn run() {
    match list_groups() {
        Ok(()) => {}
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn list_groups() -> Result<()> {
    let config = Config::from_env()?;
    let groups = config.load_groups()?;

    println!("📋 Configured ticker groups:\n");

    for name in groups.group_names() {
        if let Some(tickers) = groups.groups.get(&name) {
            println!("🔹 {} ({} tickers)", name, tickers.len());
            println!("   {}", tickers.join(", "));
        }
    }

    Ok(())
}
