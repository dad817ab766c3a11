use telq::{Credentials, Network, TelqClientBuilder};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut client = TelqClientBuilder::from_env()?.build()?;
    client.authenticate(&Credentials::from_env()?).await?;

    let networks = client.get_networks().await?;
    let networks: Vec<Network> = serde_json::from_value(networks)?;
    for network in &networks {
        println!(
            "{} {} {:?} {:?} (ported from {:?})",
            network.mcc.as_str(),
            network.mnc.as_str(),
            network.country_name,
            network.provider_name,
            network.ported_from_mnc.as_ref().map(|mnc| mnc.as_str()),
        );
    }
    println!("{} networks available", networks.len());

    Ok(())
}
