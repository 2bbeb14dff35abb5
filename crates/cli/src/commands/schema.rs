use herald_smtp::SmtpConfiguration;

pub fn run() -> anyhow::Result<()> {
    println!("{}", render()?);
    Ok(())
}

fn render() -> anyhow::Result<String> {
    let schema = schemars::schema_for!(SmtpConfiguration);
    Ok(serde_json::to_string_pretty(&schema)?)
}
