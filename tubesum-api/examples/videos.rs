use tubesum_api::{Client, Request, TubesumApiError};

#[tokio::main]
pub async fn main() -> Result<(), TubesumApiError> {
    let client = Client::new("access_token");

    let req = Request::videos().list();

    let res = client.send(req).await?;
    for video in res.videos {
        println!("{} {}", video.video_id, video.title);
    }
    Ok(())
}
