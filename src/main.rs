use profile_summary::{
    config::Config, init_tracing, scraper::ProfileFetcher, summary::SummaryGenerator,
};

const PROFILE_URL: &str = "https://www.linkedin.com/in/eden-marco/";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    init_tracing();
    println!("OPENAI_API_KEY: {}", config.masked_openai_key());

    let fetcher = ProfileFetcher::new(&config)?;
    let generator = SummaryGenerator::new(&config)?;

    let profile = fetcher.fetch(PROFILE_URL, true).await?;
    let summary = generator.generate(profile.as_ref()).await?;

    println!("{}", summary);
    Ok(())
}
