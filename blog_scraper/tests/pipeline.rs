use std::{fs, path::Path, process::Command};

use blog_scraper::{process_url, ScrapeError, ScraperConfig};
use tempfile::TempDir;
use wiremock::{
    matchers::{header, method, path},
    Mock, MockServer, ResponseTemplate,
};

const HELLO_WORLD: &str = r#"<!DOCTYPE html>
<html>
<head><title>Hello World</title></head>
<body>
  <nav><a href="/">Home</a></nav>
  <time datetime="2021-05-04">May 4th</time>
  <article><p>Body text</p></article>
  <footer>© someone</footer>
</body>
</html>"#;

fn config_in(dir: &Path) -> ScraperConfig {
    ScraperConfig {
        output_dir: dir.join("scrapped websites"),
        ..ScraperConfig::default()
    }
}

async fn serve(route: &str, template: ResponseTemplate) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(template)
        .mount(&server)
        .await;
    server
}

fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.to_string(), "text/html; charset=utf-8")
}

#[tokio::test]
async fn hello_world_end_to_end() {
    let server = serve("/post", html(HELLO_WORLD)).await;
    let tmp = TempDir::new().unwrap();
    let url = format!("{}/post", server.uri());

    let written = process_url(&config_in(tmp.path()), &url).await.unwrap();

    assert!(written.is_absolute());
    assert_eq!(written.file_name().unwrap(), "hello-world.md");
    let text = fs::read_to_string(&written).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.first(), Some(&"# Hello World"));
    assert!(lines.contains(&"*Published on 2021-05-04*"));
    assert!(lines.contains(&"Body text"));
    assert_eq!(lines.last().copied(), Some(format!("Taken from: {url}").as_str()));
    assert!(!text.contains("Home"));
    assert!(!text.contains("someone"));
}

#[tokio::test]
async fn sends_identifying_user_agent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ua"))
        .and(header(
            "user-agent",
            "Mozilla/5.0 (compatible; BlogScraper/1.0; +https://github.com/yourname/blog-scraper)",
        ))
        .respond_with(html(HELLO_WORLD))
        .expect(1)
        .mount(&server)
        .await;
    let tmp = TempDir::new().unwrap();

    process_url(&config_in(tmp.path()), &format!("{}/ua", server.uri()))
        .await
        .unwrap();
}

#[tokio::test]
async fn og_title_and_json_ld_date_reach_the_file() {
    let page = r#"<html><head>
        <title>Generic Site Title</title>
        <meta property="og:title" content="The Real Headline">
        <script type="application/ld+json">{"@type": "Article", "datePublished": "2020-02-29T23:00:00-05:00"}</script>
        </head><body><div class="post-content"><h2>Part one</h2><p>See <a href="https://elsewhere.test">this page</a>.</p></div></body></html>"#;
    let server = serve("/og", html(page)).await;
    let tmp = TempDir::new().unwrap();

    let written = process_url(&config_in(tmp.path()), &format!("{}/og", server.uri()))
        .await
        .unwrap();

    assert_eq!(written.file_name().unwrap(), "the-real-headline.md");
    let text = fs::read_to_string(&written).unwrap();
    assert!(text.starts_with("# The Real Headline\n"));
    assert!(text.contains("*Published on 2020-02-29*"));
    assert!(text.contains("## Part one"));
    assert!(text.contains("See this page."));
    assert!(!text.contains("elsewhere.test"));
}

#[tokio::test]
async fn undated_page_has_no_published_line() {
    let page = "<html><head><title>No Date</title></head><body><main><p>Just words.</p></main></body></html>";
    let server = serve("/nodate", html(page)).await;
    let tmp = TempDir::new().unwrap();

    let written = process_url(&config_in(tmp.path()), &format!("{}/nodate", server.uri()))
        .await
        .unwrap();

    let text = fs::read_to_string(&written).unwrap();
    assert!(!text.contains("Published on"));
    assert!(text.contains("Just words."));
}

#[tokio::test]
async fn untitled_page_gets_a_url_derived_name() {
    let page = "<html><body><p>Orphan content</p></body></html>";
    let server = serve("/orphan-post", html(page)).await;
    let tmp = TempDir::new().unwrap();

    let written = process_url(&config_in(tmp.path()), &format!("{}/orphan-post", server.uri()))
        .await
        .unwrap();

    let name = written.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.ends_with("-orphan-post.md"), "got {name}");
    assert!(name.starts_with("127-0-0-1"), "got {name}");
}

#[tokio::test]
async fn http_404_is_a_fetch_error_and_writes_nothing() {
    let server = serve("/missing", ResponseTemplate::new(404)).await;
    let tmp = TempDir::new().unwrap();
    let config = config_in(tmp.path());

    let err = process_url(&config, &format!("{}/missing", server.uri()))
        .await
        .unwrap_err();

    assert!(matches!(err, ScrapeError::Fetch { .. }), "got {err:?}");
    assert!(!config.output_dir.exists());
}

#[tokio::test]
async fn url_without_scheme_is_rejected_before_fetching() {
    let tmp = TempDir::new().unwrap();
    let config = config_in(tmp.path());

    let err = process_url(&config, "example.com/post").await.unwrap_err();

    assert!(err.is_usage());
    assert!(!config.output_dir.exists());
}

fn run_binary(cwd: &Path, args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_blog_scraper"))
        .args(args)
        .current_dir(cwd)
        .env("BLOG_SCRAPER_OUTPUT_DIR", cwd.join("out"))
        .env("RUST_LOG", "off")
        .output()
        .unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn binary_exit_codes() {
    let server = serve("/post", html(HELLO_WORLD)).await;
    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    let tmp = TempDir::new().unwrap();

    let ok = run_binary(tmp.path(), &[&format!("{}/post", server.uri())]);
    assert_eq!(ok.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&ok.stdout);
    assert!(stdout.contains("Saved to"), "stdout: {stdout}");
    assert!(stdout.contains("hello-world.md"), "stdout: {stdout}");

    let missing = run_binary(tmp.path(), &[&format!("{}/gone", server.uri())]);
    assert_eq!(missing.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&missing.stdout).starts_with("Error:"));

    let no_scheme = run_binary(tmp.path(), &["example.com"]);
    assert_eq!(no_scheme.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&no_scheme.stdout).contains("full URL"));

    let no_args = run_binary(tmp.path(), &[]);
    assert_eq!(no_args.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&no_args.stdout).contains("Usage"));

    let too_many = run_binary(tmp.path(), &["https://a.test", "https://b.test"]);
    assert_eq!(too_many.status.code(), Some(1));
}
