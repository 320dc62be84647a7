#[actix_web::main]
async fn main() -> std::io::Result<()> {
    deckview_lib::run().await
}
