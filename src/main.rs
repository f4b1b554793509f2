use h1frame::config::Config;
use h1frame::http::response::default_headers;
use h1frame::http::{Headers, Request, StatusCode};
use h1frame::server::{Server, TcpResponseWriter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let cfg = Config::load()?;
    let server = Server::bind(&cfg.server).await?;

    tokio::select! {
        res = server.serve(handle) => {
            res?;
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}

async fn handle(req: Request, mut w: TcpResponseWriter) -> anyhow::Result<()> {
    match req.target() {
        "/yourproblem" => {
            let body = page("400 Bad Request", "Your request honestly kinda sucked.");
            respond(&mut w, StatusCode::BAD_REQUEST, body).await
        }
        "/myproblem" => {
            let body = page("500 Internal Server Error", "Okay, you know what? This one is on me.");
            respond(&mut w, StatusCode::INTERNAL_SERVER_ERROR, body).await
        }
        "/chunked" => chunked(&mut w).await,
        _ => {
            let body = page("200 OK", "Your request was an absolute banger.");
            respond(&mut w, StatusCode::OK, body).await
        }
    }
}

async fn respond(w: &mut TcpResponseWriter, status: StatusCode, body: String) -> anyhow::Result<()> {
    let mut headers = default_headers(body.len());
    headers.set("Content-Type", "text/html");

    w.write_status_line(status).await?;
    w.write_headers(&headers).await?;
    w.write_body(body.as_bytes()).await?;
    w.shutdown().await?;
    Ok(())
}

async fn chunked(w: &mut TcpResponseWriter) -> anyhow::Result<()> {
    let mut headers = default_headers(0);
    headers.remove("Content-Length");
    headers.set("Transfer-Encoding", "chunked");
    headers.set("Trailer", "X-Content-Length");

    w.write_status_line(StatusCode::OK).await?;
    w.write_headers(&headers).await?;

    let mut total = 0;
    for line in ["streamed ", "one chunk ", "at a time\n"] {
        w.write_chunked_body(line.as_bytes()).await?;
        total += line.len();
    }
    w.write_chunked_body_done().await?;

    let mut trailers = Headers::new();
    trailers.set("X-Content-Length", total.to_string());
    w.write_trailers(&trailers).await?;
    w.shutdown().await?;
    Ok(())
}

fn page(title: &str, message: &str) -> String {
    format!(
        "<html>\n  <head>\n    <title>{title}</title>\n  </head>\n  <body>\n    <h1>{title}</h1>\n    <p>{message}</p>\n  </body>\n</html>\n"
    )
}
