//! Single article page

use crate::app::{AppAction, AppState, StorefrontStore};
use crate::selectors;
use crate::slices::ArticleAction;
use crate::views::Dispatched;
use crate::views::markup::{image, status_notice, text};
use petshop_api::CatalogApi;
use petshop_runtime::StoreError;
use std::fmt::Write;

/// Page showing one article
pub struct ArticlePage<'a, A>
where
    A: CatalogApi + Clone + 'static,
{
    store: &'a StorefrontStore<A>,
    id: u32,
}

impl<'a, A> ArticlePage<'a, A>
where
    A: CatalogApi + Clone + 'static,
{
    /// Bind the page for article `id` to a store
    #[must_use]
    pub const fn new(store: &'a StorefrontStore<A>, id: u32) -> Self {
        Self { store, id }
    }

    /// Fetch the article
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] after teardown
    pub async fn mount(&self) -> Result<Dispatched, StoreError> {
        let handle = self
            .store
            .send(AppAction::Article(ArticleAction::Fetch(self.id)))
            .await?;
        Ok(handle.into())
    }

    /// Cancel the article fetch
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] after teardown
    pub async fn unmount(&self) -> Result<(), StoreError> {
        let _ = self.store.send(AppAction::Article(ArticleAction::Cancel)).await?;
        Ok(())
    }

    /// Render the page
    pub async fn render(&self) -> String {
        let id = self.id;
        self.store.state(|s| render_article_page(s, id)).await
    }
}

/// Markup of the article page
///
/// The description is trusted rich HTML from the shop's editor and is
/// embedded as is.
#[must_use]
pub fn render_article_page(state: &AppState, id: u32) -> String {
    let mut out = String::from(r#"<section class="article-page">"#);

    match selectors::article_by_id(state, id) {
        Some(article) => {
            let _ = write!(
                out,
                concat!(
                    "<h1>{title}</h1>",
                    r#"<p class="meta"><time datetime="{date}">{date}</time> {read}</p>"#,
                    "{image}",
                    r#"<div class="article-body">{body}</div>"#
                ),
                title = text(&article.title),
                date = article.date_added,
                read = text(&article.time_read),
                image = image(article.image.as_deref(), &article.title),
                body = article.description,
            );
        },
        None => out.push_str(&status_notice(&state.article.article, "the article")),
    }

    out.push_str("</section>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::sample_article;

    #[test]
    fn test_description_is_embedded_verbatim() {
        let mut state = AppState::default();
        let request = state.article.article.begin();
        let _ = state
            .article
            .article
            .resolve(request, Some(sample_article(5, None)), None);

        let html = render_article_page(&state, 5);
        assert!(html.contains("<p>Body of article 5</p>"));
        assert!(html.contains("<h1>Article 5</h1>"));
    }

    #[test]
    fn test_missing_article_shows_status() {
        let mut state = AppState::default();
        let request = state.article.article.begin();
        let _ = state.article.article.reject(request, "API error (status 404): Not found.");

        let html = render_article_page(&state, 5);
        assert!(html.contains("status-failed"));
    }
}
