use telq::{
    BatchResultsQuery, Credentials, DateTimeBound, Page, PageSize, SortOrder, TelqClientBuilder,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut client = TelqClientBuilder::from_env()?.build()?;
    client.authenticate(&Credentials::from_env()?).await?;

    let mut query = BatchResultsQuery {
        page: Page::new(1)?,
        size: PageSize::new(20)?,
        order: SortOrder::Desc,
        ..Default::default()
    };
    if let Ok(from) = std::env::var("TELQ_FROM") {
        query.from = Some(DateTimeBound::new(from)?);
    }
    if let Ok(to) = std::env::var("TELQ_TO") {
        query.to = Some(DateTimeBound::new(to)?);
    }

    let page = client.get_batch_test_results(&query).await?;
    println!("{page:#}");

    Ok(())
}
