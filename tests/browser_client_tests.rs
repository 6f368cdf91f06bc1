/// Headless renderer tests
/// These tests require Chrome/Chromium to be installed
/// Run with: cargo test --test browser_client_tests -- --ignored
use httpmock::prelude::*;
use leercapitulo_scraper::browser::{BrowserConfig, ChapterRenderer, HeadlessRenderer};
use leercapitulo_scraper::http_client::HttpClientConfig;
use leercapitulo_scraper::site::SiteProfile;
use reqwest::Url;

fn renderer_for(server: &MockServer) -> HeadlessRenderer {
    let site = SiteProfile::new(Url::parse(&server.base_url()).unwrap());
    let config = BrowserConfig {
        settle_delay_ms: 200,
        timeout_secs: 15,
        ..Default::default()
    };
    HeadlessRenderer::new(config, &HttpClientConfig::default(), &site)
}

#[tokio::test]
#[ignore] // Requires Chrome/Chromium
async fn test_options_filled_by_script() {
    let server = MockServer::start_async().await;
    let first = server.url("/uploads/ch/01.jpg");
    let second = server.url("/uploads/ch/02.jpg");
    let page = format!(
        r#"<html><body>
             <select id="pages"></select>
             <script>
               const sel = document.getElementById('pages');
               for (const url of ["{first}", "{second}", "{first}"]) {{
                 const opt = document.createElement('option');
                 opt.value = url;
                 opt.textContent = url;
                 sel.appendChild(opt);
               }}
             </script>
           </body></html>"#
    );
    server
        .mock_async(|when, then| {
            when.method(GET).path("/leer/ch/1/");
            then.status(200).header("content-type", "text/html").body(&page);
        })
        .await;

    let set = renderer_for(&server)
        .extract_images(&server.url("/leer/ch/1/"))
        .await
        .expect("render should succeed. Is Chrome/Chromium installed?");

    assert_eq!(set.chapter_url, server.url("/leer/ch/1/"));
    assert_eq!(set.images, vec![first, second]);
}

#[tokio::test]
#[ignore] // Requires Chrome/Chromium
async fn test_lazy_images_without_selector() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/leer/ch/2/");
            then.status(200).header("content-type", "text/html").body(
                r#"<html><body>
                     <img src="/assets/logo.png">
                     <img data-src="/uploads/ch/2/01.webp">
                     <img data-original="/uploads/ch/2/02.webp">
                   </body></html>"#,
            );
        })
        .await;

    let set = renderer_for(&server)
        .extract_images(&server.url("/leer/ch/2/"))
        .await
        .unwrap();

    assert_eq!(
        set.images,
        vec![server.url("/uploads/ch/2/01.webp"), server.url("/uploads/ch/2/02.webp")]
    );
}

#[tokio::test]
#[ignore] // Requires Chrome/Chromium
async fn test_sends_site_referer() {
    let server = MockServer::start_async().await;
    let referer = format!("{}/", server.base_url());
    let page = server
        .mock_async(|when, then| {
            when.method(GET).path("/leer/ch/3/").header("Referer", referer.as_str());
            then.status(200).header("content-type", "text/html").body("<p></p>");
        })
        .await;

    let set = renderer_for(&server)
        .extract_images(&server.url("/leer/ch/3/"))
        .await
        .unwrap();

    assert!(set.is_empty());
    page.assert_async().await;
}
