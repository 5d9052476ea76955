//! Blog listing page

use crate::app::{AppAction, AppState, StorefrontStore};
use crate::selectors;
use crate::slices::{AnimalsAction, ArticlesAction};
use crate::views::Dispatched;
use crate::views::markup::{attr, image, status_notice, text};
use petshop_api::CatalogApi;
use petshop_runtime::StoreError;
use std::fmt::Write;

/// Blog listing with a "show more" toggle
pub struct ArticlesPage<'a, A>
where
    A: CatalogApi + Clone + 'static,
{
    store: &'a StorefrontStore<A>,
    show_all: bool,
}

impl<'a, A> ArticlesPage<'a, A>
where
    A: CatalogApi + Clone + 'static,
{
    /// Bind the page to a store
    #[must_use]
    pub const fn new(store: &'a StorefrontStore<A>) -> Self {
        Self {
            store,
            show_all: false,
        }
    }

    /// Fetch animal types and articles for the currently chosen animal
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] after teardown
    pub async fn mount(&self) -> Result<Dispatched, StoreError> {
        let chosen_animal = self.store.state(|s| s.animals.chosen).await;

        let mut dispatched = Dispatched::default();
        dispatched.push(self.store.send(AppAction::Animals(AnimalsAction::Fetch)).await?);
        dispatched.push(
            self.store
                .send(AppAction::Articles(ArticlesAction::Fetch { chosen_animal }))
                .await?,
        );
        Ok(dispatched)
    }

    /// Switch the listing to another animal type, or to every animal with `None`
    ///
    /// Records the choice and refetches the articles for it.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] after teardown
    pub async fn choose_animal(
        &self,
        chosen_animal: Option<u32>,
    ) -> Result<Dispatched, StoreError> {
        let mut dispatched = Dispatched::default();
        dispatched.push(
            self.store
                .send(AppAction::Animals(AnimalsAction::Choose(chosen_animal)))
                .await?,
        );
        dispatched.push(
            self.store
                .send(AppAction::Articles(ArticlesAction::Fetch { chosen_animal }))
                .await?,
        );
        Ok(dispatched)
    }

    /// Cancel the page's requests
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] after teardown
    pub async fn unmount(&self) -> Result<(), StoreError> {
        let _ = self.store.send(AppAction::Animals(AnimalsAction::Cancel)).await?;
        let _ = self.store.send(AppAction::Articles(ArticlesAction::Cancel)).await?;
        Ok(())
    }

    /// Reveal every article
    pub const fn show_more(&mut self) {
        self.show_all = true;
    }

    /// Whether every article is revealed
    #[must_use]
    pub const fn shows_all(&self) -> bool {
        self.show_all
    }

    /// Render the page
    pub async fn render(&self) -> String {
        let show_all = self.show_all;
        self.store.state(|s| render_articles_page(s, show_all)).await
    }
}

/// Markup of the blog listing
#[must_use]
pub fn render_articles_page(state: &AppState, show_all: bool) -> String {
    let mut out = String::from(r#"<section class="articles-page">"#);
    out.push_str(&render_animal_types(state));

    match selectors::chosen_animal_name(state) {
        Some(name) => {
            let _ = write!(out, "<h2>{} - useful articles</h2>", text(name));
        },
        None => out.push_str("<h2>Useful articles</h2>"),
    }

    out.push_str(&status_notice(&state.articles.articles, "articles"));

    out.push_str(r#"<div class="articles">"#);
    for article in selectors::articles_for_block(state, show_all) {
        let _ = write!(
            out,
            concat!(
                r#"<article class="article-card" data-id="{id}">"#,
                r#"<a href="/articles/{id}">{image}<h3>{title}</h3></a>"#,
                r#"<p class="meta"><time datetime="{date}">{date}</time> {read}</p>"#,
                "</article>"
            ),
            id = article.id,
            image = image(article.image.as_deref(), &article.title),
            title = text(&article.title),
            date = article.date_added,
            read = text(&article.time_read),
        );
    }
    out.push_str("</div>");

    if selectors::can_show_more_articles(state, show_all) {
        let _ = write!(
            out,
            r#"<button class="show-more" aria-label="{}">Show more</button>"#,
            attr("Show more articles")
        );
    }

    out.push_str("</section>");
    out
}

/// The animal switcher, with the chosen type marked
fn render_animal_types(state: &AppState) -> String {
    let mut out = String::from(r#"<nav class="animal-types">"#);
    out.push_str(&status_notice(&state.animals.animals, "animal types"));
    out.push_str("<ul>");
    for animal in state.animals.animals.value() {
        let chosen = state.animals.chosen == Some(animal.id);
        let _ = write!(
            out,
            concat!(
                "<li>",
                r#"<button class="animal-type{class}" data-id="{id}" aria-pressed="{chosen}">"#,
                "{image}{name}</button></li>"
            ),
            class = if chosen { " chosen" } else { "" },
            id = animal.id,
            chosen = chosen,
            image = image(animal.image.as_deref(), &animal.name),
            name = text(&animal.name),
        );
    }
    out.push_str("</ul></nav>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::sample_article;
    use petshop_api::AnimalType;

    fn state_with(count: u32) -> AppState {
        let mut state = AppState::default();
        let request = state.articles.articles.begin();
        let _ = state.articles.articles.resolve(
            request,
            (1..=count).map(|id| sample_article(id, None)).collect(),
            None,
        );
        state
    }

    #[test]
    fn test_preview_and_show_more_button() {
        let html = render_articles_page(&state_with(4), false);
        assert_eq!(html.matches("article-card").count(), 3);
        assert!(html.contains("show-more"));

        let html = render_articles_page(&state_with(4), true);
        assert_eq!(html.matches("article-card").count(), 4);
        assert!(!html.contains("show-more"));
    }

    #[test]
    fn test_animal_switcher_marks_chosen_type() {
        let mut state = state_with(1);
        let request = state.animals.animals.begin();
        let _ = state.animals.animals.resolve(
            request,
            vec![
                AnimalType { id: 1, name: "Cats".into(), image: None },
                AnimalType { id: 2, name: "Dogs".into(), image: None },
            ],
            None,
        );
        state.animals.chosen = Some(2);

        let html = render_articles_page(&state, false);
        assert!(html.contains(r#"<button class="animal-type" data-id="1" aria-pressed="false">"#));
        assert!(
            html.contains(r#"<button class="animal-type chosen" data-id="2" aria-pressed="true">"#)
        );
    }

    #[test]
    fn test_titles_are_escaped() {
        let mut state = state_with(1);
        state.articles.articles.value_mut()[0].title = "<script>x</script>".to_string();

        let html = render_articles_page(&state, false);
        assert!(html.contains("&lt;script&gt;x&lt;/script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_failed_fetch_shows_error() {
        let mut state = AppState::default();
        let request = state.articles.articles.begin();
        let _ = state.articles.articles.reject(request, "API error (status 502)");

        let html = render_articles_page(&state, false);
        assert!(html.contains("status-failed"));
        assert!(html.contains("status 502"));
    }
}
