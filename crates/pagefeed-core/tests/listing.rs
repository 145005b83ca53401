//! Listing tests over the in-memory catalog.
//!
//! These exercise filtering and paging end to end: page walks never repeat
//! or skip an article, unknown names yield empty pages, and feed mode
//! distinguishes an anonymous caller from an unknown one.

use std::collections::BTreeSet;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};

use pagefeed_core::cursor;
use pagefeed_core::{
    Article, ArticleFilter, ArticleId, ArticleQuery, ArticleSource, ArticlesPage, CursorKey,
    MemoryCatalog, Profile, TagId, UserId, Username, Window, list_articles,
};

const JAKE: UserId = UserId::new(1);
const ANNA: UserId = UserId::new(2);
const OMAR: UserId = UserId::new(3);

fn at(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
}

fn article(id: u64, created_at: DateTime<Utc>, author: UserId) -> Article {
    Article {
        id: ArticleId::new(id),
        slug: format!("article-{id}"),
        title: format!("Article {id}"),
        body: "body".to_string(),
        author,
        created_at,
        tags: BTreeSet::new(),
        favorited_by: BTreeSet::new(),
    }
}

fn users() -> Vec<Profile> {
    vec![
        Profile::new(JAKE, Username::new("jake").unwrap()).with_following(ANNA),
        Profile::new(ANNA, Username::new("anna").unwrap()),
        Profile::new(OMAR, Username::new("omar").unwrap())
            .with_following(JAKE)
            .with_following(ANNA),
    ]
}

/// 25 articles with distinct timestamps, authored round-robin, every third
/// tagged "rust", even ids favorited by omar.
fn catalog() -> MemoryCatalog {
    let authors = [JAKE, ANNA, OMAR];
    let articles = (1..=25u64)
        .map(|id| {
            let mut a = article(id, at(id as i64 * 60), authors[(id as usize) % 3]);
            if id % 3 == 0 {
                a.tags.insert(TagId::new("rust").unwrap());
            }
            a.tags.insert(TagId::new("misc").unwrap());
            if id % 2 == 0 {
                a.favorited_by.insert(OMAR);
            }
            a
        })
        .collect();
    MemoryCatalog::from_parts(users(), articles)
}

/// Articles sharing timestamps heavily, to stress the tie-break.
fn clustered_catalog() -> MemoryCatalog {
    let articles = (1..=40u64)
        .map(|id| article(id, at((id % 4) as i64), JAKE))
        .collect();
    MemoryCatalog::from_parts(users(), articles)
}

fn ids(page: &ArticlesPage) -> Vec<u64> {
    page.items.iter().map(|a| a.id.get()).collect()
}

/// Follow `nextCursor` until `hasMore` is false, collecting every page.
async fn walk(catalog: &MemoryCatalog, query: ArticleQuery) -> Vec<ArticlesPage> {
    let mut pages = Vec::new();
    let mut next = query.clone();
    loop {
        let page = list_articles(catalog, catalog, &next).await.unwrap();
        let cursor = page.next_cursor.clone();
        let has_more = page.has_more;
        pages.push(page);
        match cursor {
            Some(c) if has_more => next = query.clone().cursor(c),
            _ => break,
        }
        assert!(pages.len() < 100, "pagination did not terminate");
    }
    pages
}

fn expected_order(catalog: &MemoryCatalog, filter: impl Fn(&Article) -> bool) -> Vec<u64> {
    let mut matching: Vec<&Article> = catalog.articles().iter().filter(|a| filter(*a)).collect();
    matching.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
    matching.iter().map(|a| a.id.get()).collect()
}

#[tokio::test]
async fn first_page_of_twenty_five() {
    let catalog = catalog();
    let page = list_articles(&catalog, &catalog, &ArticleQuery::new())
        .await
        .unwrap();

    assert_eq!(page.items.len(), 20);
    assert_eq!(page.total_count, 25);
    assert!(page.has_more);
    assert_eq!(ids(&page), (6..=25).rev().collect::<Vec<_>>());

    let last = &page.items[19];
    assert_eq!(
        page.next_cursor.as_deref(),
        Some(cursor::encode(last.created_at, last.id).as_str())
    );

    let second = list_articles(
        &catalog,
        &catalog,
        &ArticleQuery::new().cursor(page.next_cursor.unwrap()),
    )
    .await
    .unwrap();

    assert_eq!(ids(&second), vec![5, 4, 3, 2, 1]);
    assert_eq!(second.total_count, 25);
    assert!(!second.has_more);
    assert_eq!(second.next_cursor, None);
}

#[tokio::test]
async fn walking_pages_yields_each_article_once_in_order() {
    let catalog = catalog();
    for limit in [1, 2, 3, 7, 24, 25, 26, 100] {
        let pages = walk(&catalog, ArticleQuery::new().limit(limit)).await;
        let seen: Vec<u64> = pages.iter().flat_map(ids).collect();
        assert_eq!(seen, expected_order(&catalog, |_| true), "limit {limit}");
        assert!(pages.iter().all(|p| p.total_count == 25));
    }
}

#[tokio::test]
async fn walking_pages_with_shared_timestamps() {
    let catalog = clustered_catalog();
    for limit in [1, 3, 4, 9, 10] {
        let pages = walk(&catalog, ArticleQuery::new().limit(limit)).await;
        let seen: Vec<u64> = pages.iter().flat_map(ids).collect();
        assert_eq!(seen, expected_order(&catalog, |_| true), "limit {limit}");
    }
}

#[tokio::test]
async fn walking_filtered_pages() {
    let catalog = catalog();
    let query = ArticleQuery::new().tag("rust").favorited_by("omar").limit(1);
    let pages = walk(&catalog, query).await;
    let seen: Vec<u64> = pages.iter().flat_map(ids).collect();

    assert_eq!(seen, vec![24, 18, 12, 6]);
    assert!(pages.iter().all(|p| p.total_count == 4));
}

#[tokio::test]
async fn tie_break_cursor_excludes_seen_article() {
    let articles = vec![
        article(7, at(100), JAKE),
        article(9, at(100), JAKE),
        article(3, at(50), JAKE),
    ];
    let catalog = MemoryCatalog::from_parts(users(), articles);

    let first = list_articles(&catalog, &catalog, &ArticleQuery::new().limit(1))
        .await
        .unwrap();
    assert_eq!(ids(&first), vec![9]);

    let cursor = CursorKey::new(at(100), ArticleId::new(9)).encode();
    assert_eq!(first.next_cursor.as_deref(), Some(cursor.as_str()));

    let second = list_articles(
        &catalog,
        &catalog,
        &ArticleQuery::new().limit(1).cursor(cursor),
    )
    .await
    .unwrap();
    assert_eq!(ids(&second), vec![7]);
    assert!(second.has_more);
}

#[tokio::test]
async fn has_more_iff_more_than_limit_remain() {
    let catalog = catalog();
    for offset in 0..=25i64 {
        for limit in [1i64, 5, 10] {
            let page = list_articles(
                &catalog,
                &catalog,
                &ArticleQuery::new().limit(limit).offset(offset),
            )
            .await
            .unwrap();
            let remaining = 25 - offset;
            assert_eq!(page.has_more, remaining > limit, "offset {offset} limit {limit}");
            assert_eq!(page.items.len() as i64, remaining.min(limit));
            assert_eq!(page.next_cursor.is_some(), page.has_more);
        }
    }
}

#[tokio::test]
async fn cursor_wins_over_offset() {
    let catalog = catalog();
    let cursor = CursorKey::new(at(20 * 60), ArticleId::new(20)).encode();
    let page = list_articles(
        &catalog,
        &catalog,
        &ArticleQuery::new().limit(3).offset(10).cursor(cursor),
    )
    .await
    .unwrap();

    assert_eq!(ids(&page), vec![19, 18, 17]);
}

#[tokio::test]
async fn invalid_cursor_falls_back_to_offset() {
    let catalog = catalog();
    let page = list_articles(
        &catalog,
        &catalog,
        &ArticleQuery::new().limit(3).offset(10).cursor("not-a-cursor"),
    )
    .await
    .unwrap();

    assert_eq!(ids(&page), vec![15, 14, 13]);
}

#[tokio::test]
async fn invalid_cursor_without_offset_starts_over() {
    let catalog = catalog();
    let page = list_articles(
        &catalog,
        &catalog,
        &ArticleQuery::new().limit(3).cursor("eyJ0IjoiYnJva2VuIn0"),
    )
    .await
    .unwrap();

    assert_eq!(ids(&page), vec![25, 24, 23]);
}

#[tokio::test]
async fn unknown_names_yield_empty_pages() {
    let catalog = catalog();
    for query in [
        ArticleQuery::new().tag("haskell"),
        ArticleQuery::new().author("nobody"),
        ArticleQuery::new().favorited_by("nobody"),
        ArticleQuery::new().tag("rust").author("nobody"),
    ] {
        let page = list_articles(&catalog, &catalog, &query).await.unwrap();
        assert_eq!(page, ArticlesPage::empty());
        assert_eq!(page.total_count, 0);
        assert!(!page.has_more);
    }
}

#[tokio::test]
async fn author_filter() {
    let catalog = catalog();
    let page = list_articles(&catalog, &catalog, &ArticleQuery::new().author("anna"))
        .await
        .unwrap();

    assert_eq!(
        ids(&page),
        expected_order(&catalog, |a| a.author == ANNA)
    );
    assert_eq!(page.total_count, 9);
}

#[tokio::test]
async fn feed_restricts_to_followed_authors() {
    let catalog = catalog();
    let query = ArticleQuery::new().feed().current_user(JAKE).limit(100);
    let page = list_articles(&catalog, &catalog, &query).await.unwrap();

    assert_eq!(ids(&page), expected_order(&catalog, |a| a.author == ANNA));

    let query = ArticleQuery::new().feed().current_user(OMAR).limit(100);
    let page = list_articles(&catalog, &catalog, &query).await.unwrap();
    assert_eq!(
        ids(&page),
        expected_order(&catalog, |a| a.author == JAKE || a.author == ANNA)
    );
}

#[tokio::test]
async fn feed_for_unknown_current_user_fails() {
    let catalog = catalog();
    let query = ArticleQuery::new().feed().current_user(UserId::new(404));
    let err = list_articles(&catalog, &catalog, &query).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn feed_without_current_user_is_unfiltered() {
    let catalog = catalog();
    let page = list_articles(&catalog, &catalog, &ArticleQuery::new().feed())
        .await
        .unwrap();
    assert_eq!(page.total_count, 25);
}

#[tokio::test]
async fn non_positive_limit_is_clamped_to_one() {
    let catalog = catalog();
    for limit in [0, -1] {
        let page = list_articles(&catalog, &catalog, &ArticleQuery::new().limit(limit))
            .await
            .unwrap();
        assert_eq!(ids(&page), vec![25]);
        assert!(page.has_more);
    }
}

/// A source that stalls before answering, to observe cancellation.
struct SlowSource(MemoryCatalog);

#[async_trait]
impl ArticleSource for SlowSource {
    async fn count(&self, filter: &ArticleFilter) -> pagefeed_core::Result<u64> {
        self.0.count(filter).await
    }

    async fn fetch(
        &self,
        filter: &ArticleFilter,
        window: &Window,
    ) -> pagefeed_core::Result<Vec<Article>> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        self.0.fetch(filter, window).await
    }
}

#[tokio::test(start_paused = true)]
async fn cancelled_request_returns_nothing() {
    let catalog = catalog();
    let slow = SlowSource(catalog.clone());

    let result = tokio::time::timeout(
        Duration::from_secs(1),
        list_articles(&slow, &catalog, &ArticleQuery::new()),
    )
    .await;
    assert!(result.is_err(), "request should have been cancelled");

    let page = tokio::time::timeout(
        Duration::from_secs(60),
        list_articles(&slow, &catalog, &ArticleQuery::new()),
    )
    .await
    .expect("request should complete")
    .unwrap();
    assert_eq!(page.items.len(), 20);
}
