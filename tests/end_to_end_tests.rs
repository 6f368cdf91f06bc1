/// End-to-end integration tests
/// Tests the complete workflow from configuration to downloaded page images,
/// with the headless browser replaced by a renderer that reads static HTML
use async_trait::async_trait;
use httpmock::prelude::*;
use leercapitulo_scraper::browser::{select_page_images, ChapterRenderer, RenderedPage};
use leercapitulo_scraper::config::Config;
use leercapitulo_scraper::http_client::SiteHttpClient;
use leercapitulo_scraper::models::ChapterImageSet;
use leercapitulo_scraper::site::SiteProfile;
use leercapitulo_scraper::{LeerCapitulo, RenderError};

/// Applies the browser's image rules to the served HTML without running scripts
struct StaticRenderer {
    http: SiteHttpClient,
    site: SiteProfile,
}

#[async_trait]
impl ChapterRenderer for StaticRenderer {
    async fn extract_images(&self, chapter_url: &str) -> Result<ChapterImageSet, RenderError> {
        let doc = self
            .http
            .fetch_document(chapter_url)
            .await
            .map_err(|e| RenderError::Navigation(e.to_string()))?;
        Ok(ChapterImageSet {
            chapter_url: chapter_url.to_string(),
            images: select_page_images(&RenderedPage::from_document(&doc), &self.site),
        })
    }
}

fn source_for(server: &MockServer) -> LeerCapitulo {
    // 1. Load configuration pointing at the mock origin
    let config = Config::from_toml(&format!(
        "[site]\nbase_url = \"{}\"\n\n[http]\ntimeout_secs = 5\n",
        server.base_url()
    ))
    .expect("valid config");

    // 2. Build the static client and the renderer from it
    let site = config.site_profile().expect("valid origin");
    let http = config.create_http_client(&site).expect("client");
    let renderer = StaticRenderer {
        http: http.clone(),
        site: site.clone(),
    };
    LeerCapitulo::new(site, http, Box::new(renderer))
}

#[tokio::test]
async fn test_complete_workflow_with_page_selector() {
    let server = MockServer::start_async().await;
    let manga_page = r#"<h1>Vagabond</h1>
           <h4><a href="/leer/vagabond/2/">Capítulo 2</a></h4>
           <h4><a href="/leer/vagabond/1/">Capítulo 1</a></h4>"#;
    let reader_page = format!(
        r#"<select class="page-select">
             <option value="{0}">1/2</option>
             <option value="{1}">2/2</option>
           </select>
           <img src="/assets/logo.png">"#,
        server.url("/uploads/vagabond/1/01.jpg"),
        server.url("/uploads/vagabond/1/02.jpg"),
    );

    server
        .mock_async(|when, then| {
            when.method(GET).path("/manga/vagabond/");
            then.status(200).body(manga_page);
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/leer/vagabond/1/");
            then.status(200).body(&reader_page);
        })
        .await;
    let image = server
        .mock_async(|when, then| {
            when.method(GET).path("/uploads/vagabond/1/01.jpg");
            then.status(200).body(b"\xff\xd8\xff\xe0jpeg");
        })
        .await;

    let source = source_for(&server);

    // 3. Chapter list, oldest first
    let chapters = source.chapters("/manga/vagabond/").await.unwrap();
    assert_eq!(chapters.len(), 2);
    assert_eq!(chapters[0].chapter_number, 1.0);

    // 4. Page images of the first chapter
    let set = source.chapter_images(&chapters[0].url).await.unwrap();
    assert_eq!(set.chapter_url, chapters[0].url);
    assert_eq!(set.len(), 2);
    assert_eq!(
        set.images,
        vec![
            server.url("/uploads/vagabond/1/01.jpg"),
            server.url("/uploads/vagabond/1/02.jpg"),
        ]
    );

    // 5. Download the first page
    let bytes = source.image_bytes(&set.images[0]).await.unwrap();
    assert_eq!(bytes, b"\xff\xd8\xff\xe0jpeg".to_vec());
    image.assert_async().await;
}

#[tokio::test]
async fn test_image_fallback_without_page_selector() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/leer/x/1/");
            then.status(200).body(
                r#"<div id="reader">
                     <img data-src="/uploads/x/1.jpg" src="/assets/spinner.gif">
                     <img data-src="/uploads/x/2.jpg" src="/assets/spinner.gif">
                     <img data-src="/uploads/x/3.jpg" src="/assets/spinner.gif">
                     <img data-src="/uploads/x/2.jpg" src="/assets/spinner.gif">
                   </div>"#,
            );
        })
        .await;

    let set = source_for(&server).chapter_images("/leer/x/1/").await.unwrap();
    assert_eq!(set.chapter_url, server.url("/leer/x/1/"));
    assert_eq!(
        set.images,
        vec![
            server.url("/uploads/x/1.jpg"),
            server.url("/uploads/x/2.jpg"),
            server.url("/uploads/x/3.jpg"),
        ]
    );
}

#[tokio::test]
async fn test_chapter_without_images_is_empty() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/leer/x/9/");
            then.status(200).body("<p>Capítulo no disponible</p>");
        })
        .await;

    let set = source_for(&server).chapter_images("/leer/x/9/").await.unwrap();
    assert!(set.is_empty());
}

#[tokio::test]
async fn test_concurrent_operations_are_independent() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/manga/ok/");
            then.status(200).body(r#"<h1>Ok</h1>"#);
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/manga/broken/");
            then.status(500);
        })
        .await;

    let source = source_for(&server);
    let (ok, broken) = tokio::join!(
        source.manga_detail("/manga/ok/"),
        source.manga_detail("/manga/broken/")
    );
    assert_eq!(ok.unwrap().title, "Ok");
    assert!(broken.is_err());
}
