use std::io;
use std::time::Duration;

use telq::{Credentials, TelqClientBuilder, TestId, TestResult};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let test_id: u64 = std::env::var("TELQ_TEST_ID")
        .map_err(|_| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                "TELQ_TEST_ID environment variable is required",
            )
        })?
        .parse()?;

    let mut client = TelqClientBuilder::from_env()?.build()?;
    client.authenticate(&Credentials::from_env()?).await?;

    // Poll until the test leaves WAIT; each call is a single request.
    for _ in 0..10 {
        let value = client.get_test_results(TestId::new(test_id)).await?;
        let result: TestResult = serde_json::from_value(value)?;
        println!(
            "id: {}, status: {:?}, sender: {:?}, text: {:?}, delay: {:?}",
            result.id,
            result.test_status,
            result.sender_delivered,
            result.text_delivered,
            result.receipt_delay
        );
        if result.test_status.is_final() {
            break;
        }
        tokio::time::sleep(Duration::from_secs(30)).await;
    }

    Ok(())
}
