use anyhow::{bail, Context, Result};
use log::{error, info};
use porkbun_dns::{Config, DnsRecord, DnsResponse, PorkbunClient};
use std::{env, fs::File, io::Read};

const USAGE: &str = "usage: porkbun-dns <retrieve|get|delete|create> <domain> [args]
  retrieve <domain>
  get      <domain> <id>
  delete   <domain> <id>
  create   <domain> <type> <content> [name] [ttl]";

fn load_config(config_file: &str) -> Result<Config> {
    let mut file = File::open(config_file)
        .with_context(|| format!("Failed to open config file: {}", config_file))?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .with_context(|| format!("Failed to read config file: {}", config_file))?;

    Config::from_yaml_str(&contents)
        .with_context(|| format!("Failed to parse config file: {}", config_file))
}

async fn run(client: &PorkbunClient, args: &[String]) -> Result<DnsResponse> {
    let arg = |i: usize, what: &str| {
        args.get(i)
            .map(String::as_str)
            .with_context(|| format!("missing {}\n{}", what, USAGE))
    };

    let command = arg(0, "command")?;
    let domain = arg(1, "domain")?;

    let response = match command {
        "retrieve" => client.retrieve_records(domain).await?,
        "get" => client.retrieve_record(domain, arg(2, "record id")?).await?,
        "delete" => client.delete_record(domain, arg(2, "record id")?).await?,
        "create" => {
            let mut record = DnsRecord::new(arg(2, "record type")?, arg(3, "content")?);
            if let Some(name) = args.get(4) {
                record = record.with_name(name.as_str());
            }
            if let Some(ttl) = args.get(5) {
                record = record.with_ttl(ttl.parse().context("ttl must be a number")?);
            }
            client.create_record(domain, &record).await?
        }
        other => bail!("unknown command: {}\n{}", other, USAGE),
    };

    Ok(response)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let config_file = env::var("PORKBUN_CONFIG").unwrap_or_else(|_| "config.yaml".to_string());
    let config = load_config(&config_file)?;
    let client = config.build_client()?;
    info!("Using API at {}", client.base_url());

    let args: Vec<String> = env::args().skip(1).collect();
    match run(&client, &args).await {
        Ok(response) => {
            println!("{}", serde_json::to_string_pretty(&response)?);
            Ok(())
        }
        Err(e) => {
            error!("Request failed: {:#}", e);
            Err(e)
        }
    }
}
