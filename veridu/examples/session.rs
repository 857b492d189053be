use anyhow::Result;
use veridu::{default_context, Client, Config, Method};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let ctx = default_context();
    let credential = Config::new().with_version("0.3").from_env(&ctx).credential()?;
    let client = Client::new(ctx, credential);

    let token = client.session().create(false).await?;
    println!("session created: {}", token.len());

    let username = std::env::args().nth(1).unwrap_or_else(|| "jon_doe".to_string());
    Client::ensure_username(&username)?;

    match client
        .fetch(Method::GET, &format!("profile/{username}"), [("filter", "kba")])
        .await
    {
        Ok(profile) => println!("profile: {profile:?}"),
        Err(err) if err.is_api_error() => println!("rejected by service: {err}"),
        Err(err) => return Err(err.into()),
    }
    println!("last status: {:?}", client.last_status());

    client.session().expire().await?;
    Ok(())
}
