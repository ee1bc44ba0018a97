use httpmock::prelude::*;
use rice_dashboard::config::toml_config::FallbackConfig;
use rice_dashboard::core::extract::PREVIEW_RENDITION_QUERY;
use rice_dashboard::core::fallback::{self, FallbackTier};
use rice_dashboard::utils::validation::is_absolute_http_url;
use rice_dashboard::{DashboardConfig, FeedImageResolver};
use std::time::Duration;

fn config_for(server: &MockServer) -> DashboardConfig {
    let mut config = DashboardConfig::default();
    config.feed.endpoint = server.url("/r/unixporn.rss");
    config
}

fn atom_feed(count: usize) -> String {
    let entries: String = (1..=count)
        .map(|i| {
            format!(
                r#"  <entry>
    <author><name>/u/ricer{i}</name></author>
    <category term="unixporn" label="r/unixporn"/>
    <content type="html">&lt;table&gt; &lt;tr&gt;&lt;td&gt; &lt;a href=&quot;https://www.reddit.com/r/unixporn/comments/{i}/&quot;&gt; &lt;img src=&quot;https://preview.redd.it/setup{i}.png?width=640&amp;amp;crop=smart&amp;amp;s=abc&quot; alt=&quot;shot&quot; /&gt; &lt;/a&gt; &lt;/td&gt;&lt;/tr&gt;&lt;/table&gt;</content>
    <id>t3_{i}</id>
    <link href="https://www.reddit.com/r/unixporn/comments/{i}/setup_{i}/"/>
    <updated>2024-05-0{d}T10:00:00+00:00</updated>
    <title>[Hyprland] setup number {i}</title>
  </entry>
"#,
                i = i,
                d = (i % 9) + 1
            )
        })
        .collect();

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom" xmlns:media="http://search.yahoo.com/mrss/">
  <category term="unixporn" label="r/unixporn"/>
  <updated>2024-05-09T10:00:00+00:00</updated>
  <id>/r/unixporn.rss</id>
  <link rel="self" href="https://www.reddit.com/r/unixporn.rss" type="application/atom+xml" />
  <title>unixporn: the home for *NIX customisation!</title>
{entries}</feed>"#
    )
}

fn rss_feed(items: &[(&str, &str)]) -> String {
    let items: String = items
        .iter()
        .enumerate()
        .map(|(i, (title, description))| {
            format!(
                r#"    <item>
      <title>{title}</title>
      <link>https://example.org/posts/{i}</link>
      <description><![CDATA[{description}]]></description>
    </item>
"#
            )
        })
        .collect();

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Desktop setups</title>
    <link>https://example.org</link>
    <description>Screenshots</description>
{items}  </channel>
</rss>"#
    )
}

fn expected_keyword_tier() -> Vec<rice_dashboard::FeedImageEntry> {
    fallback::keyword_tier(&FallbackConfig::default()).unwrap()
}

#[tokio::test]
async fn test_atom_feed_caps_at_five_entries_in_order() {
    let server = MockServer::start();
    let feed_mock = server.mock(|when, then| {
        when.method(GET).path("/r/unixporn.rss");
        then.status(200)
            .header("Content-Type", "application/atom+xml; charset=UTF-8")
            .body(atom_feed(7));
    });

    let resolver = FeedImageResolver::new(&config_for(&server)).unwrap();
    let resolution = resolver.resolve().await;

    feed_mock.assert();
    assert_eq!(resolution.tier(), None);

    let entries = resolution.entries();
    assert_eq!(entries.len(), 5);
    for (i, entry) in entries.iter().enumerate() {
        let n = i + 1;
        assert_eq!(entry.title, format!("[Hyprland] setup number {}", n));
        assert_eq!(
            entry.url,
            format!("https://preview.redd.it/setup{}.png{}", n, PREVIEW_RENDITION_QUERY)
        );
        assert!(entry.url.ends_with("?width=1080&format=png&auto=webp"));
        assert_eq!(entry.thumbnail, entry.url);
        assert_eq!(
            entry.link,
            format!("https://www.reddit.com/r/unixporn/comments/{}/setup_{}/", n, n)
        );
    }
}

#[tokio::test]
async fn test_primary_entries_are_well_formed() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/r/unixporn.rss");
        then.status(200).body(atom_feed(3));
    });

    let entries = FeedImageResolver::new(&config_for(&server))
        .unwrap()
        .resolve_images()
        .await;

    assert_eq!(entries.len(), 3);
    for entry in entries {
        assert!(!entry.title.is_empty());
        assert!(is_absolute_http_url(&entry.url));
        assert!(is_absolute_http_url(&entry.link));
    }
}

#[tokio::test]
async fn test_rss_direct_host_urls_are_verbatim() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/r/unixporn.rss");
        then.status(200).body(rss_feed(&[
            ("gruvbox bspwm", r#"<a href="https://i.redd.it/gruvbox.jpeg">[link]</a>"#),
            ("nord sway", r#"<p>https://i.redd.it/nord.webp</p>"#),
        ]));
    });

    let resolution = FeedImageResolver::new(&config_for(&server))
        .unwrap()
        .resolve()
        .await;

    assert_eq!(resolution.tier(), None);
    let urls: Vec<&str> = resolution.entries().iter().map(|e| e.url.as_str()).collect();
    assert_eq!(
        urls,
        vec!["https://i.redd.it/gruvbox.jpeg", "https://i.redd.it/nord.webp"]
    );
    assert_eq!(resolution.entries()[0].link, "https://example.org/posts/0");
}

#[tokio::test]
async fn test_rss_img_tag_fallback_resolves_relative_src() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/r/unixporn.rss");
        then.status(200).body(rss_feed(&[(
            "self hosted",
            r#"<img width="600" src="/media/desk.png">"#,
        )]));
    });

    let entries = FeedImageResolver::new(&config_for(&server))
        .unwrap()
        .resolve_images()
        .await;

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].url, "https://example.org/media/desk.png");
}

#[tokio::test]
async fn test_body_without_markers_uses_keyword_tier() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/r/unixporn.rss");
        then.status(200)
            .header("Content-Type", "text/html")
            .body("<html><body>Too Many Requests</body></html>");
    });

    let resolution = FeedImageResolver::new(&config_for(&server))
        .unwrap()
        .resolve()
        .await;

    assert_eq!(resolution.tier(), Some(FallbackTier::Keywords));
    assert_eq!(resolution.into_entries(), expected_keyword_tier());
}

#[tokio::test]
async fn test_timeout_uses_keyword_tier() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/r/unixporn.rss");
        then.status(200)
            .delay(Duration::from_secs(3))
            .body(atom_feed(2));
    });

    let mut config = config_for(&server);
    config.feed.timeout_seconds = 1;

    let resolution = FeedImageResolver::new(&config).unwrap().resolve().await;

    assert_eq!(resolution.tier(), Some(FallbackTier::Keywords));
    let entries = resolution.into_entries();
    assert_eq!(entries, expected_keyword_tier());
    assert!(entries
        .iter()
        .all(|e| e.url.starts_with("https://source.unsplash.com/1600x900/?")));
}

#[tokio::test]
async fn test_every_failure_mode_returns_entries() {
    let bodies: Vec<(u16, String)> = vec![
        (500, String::new()),
        (404, "not found".to_string()),
        (200, String::new()),
        (200, "<feed><entry><title>unterminated".to_string()),
        (200, "<rss><channel><item><title>x</title>".to_string()),
        (200, atom_feed(0)),
    ];

    for (status, body) in bodies {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/r/unixporn.rss");
            then.status(status).body(body.clone());
        });

        let entries = FeedImageResolver::new(&config_for(&server))
            .unwrap()
            .resolve_images()
            .await;

        assert!(!entries.is_empty(), "status {} body {:?}", status, body);
    }
}

#[tokio::test]
async fn test_server_error_is_not_retried() {
    let server = MockServer::start();
    let feed_mock = server.mock(|when, then| {
        when.method(GET).path("/r/unixporn.rss");
        then.status(500);
    });

    let resolution = FeedImageResolver::new(&config_for(&server))
        .unwrap()
        .resolve()
        .await;

    feed_mock.assert_hits(1);
    assert_eq!(resolution.tier(), Some(FallbackTier::Keywords));
}

#[tokio::test]
async fn test_redirects_are_followed() {
    let server = MockServer::start();
    let moved = server.mock(|when, then| {
        when.method(GET).path("/r/unixporn.rss");
        then.status(301).header("Location", server.url("/r/unixporn/.rss"));
    });
    let feed = server.mock(|when, then| {
        when.method(GET).path("/r/unixporn/.rss");
        then.status(200).body(atom_feed(1));
    });

    let resolution = FeedImageResolver::new(&config_for(&server))
        .unwrap()
        .resolve()
        .await;

    moved.assert();
    feed.assert();
    assert_eq!(resolution.tier(), None);
    assert_eq!(resolution.entries().len(), 1);
}

#[tokio::test]
async fn test_cancelled_fetch_uses_keyword_tier() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/r/unixporn.rss");
        then.status(200)
            .delay(Duration::from_secs(5))
            .body(atom_feed(2));
    });

    let resolver = FeedImageResolver::new(&config_for(&server)).unwrap();
    let started = std::time::Instant::now();
    let resolution = resolver
        .resolve_until(tokio::time::sleep(Duration::from_millis(100)))
        .await;

    assert!(started.elapsed() < Duration::from_secs(3));
    assert_eq!(resolution.tier(), Some(FallbackTier::Keywords));
}

#[tokio::test]
async fn test_broken_keyword_config_uses_hardcoded_tier() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/r/unixporn.rss");
        then.status(503);
    });

    let mut config = config_for(&server);
    config.fallback.keywords = vec!["linux,setup".to_string()];

    let resolution = FeedImageResolver::new(&config).unwrap().resolve().await;

    assert_eq!(resolution.tier(), Some(FallbackTier::Hardcoded));
    let entries = resolution.into_entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].title, "Linux Setup");
}

#[tokio::test]
async fn test_invalid_item_does_not_discard_earlier_images() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/r/unixporn.rss");
        then.status(200).body(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Desktop setups</title>
    <link>https://example.org</link>
    <description>Screenshots</description>
    <item>
      <title>catppuccin niri</title>
      <link>https://example.org/posts/1</link>
      <description>https://i.redd.it/niri.png</description>
    </item>
    <item>
      <title>text post</title>
      <link>/r/unixporn/comments/2/</link>
      <description>what bar is this?</description>
    </item>
    <item>
      <title>linkless</title>
      <description>https://i.redd.it/orphan.png</description>
    </item>
  </channel>
</rss>"#,
        );
    });

    let resolution = FeedImageResolver::new(&config_for(&server))
        .unwrap()
        .resolve()
        .await;

    assert_eq!(resolution.tier(), None);
    let entries = resolution.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].url, "https://i.redd.it/niri.png");
    assert_eq!(entries[0].link, "https://example.org/posts/1");
}
