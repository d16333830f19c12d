#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = exam_scheduler::run().await {
        eprintln!("exam-scheduler fatal: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}
