//! The about page: static text, translated.

use tuku::error::Error;
use tuku::page::PageContext;

use crate::{widgets, DomBackend};

/// Run the about page.
pub async fn run(ctx: PageContext<DomBackend>) -> Result<(), Error> {
    widgets::init_all(&ctx.backend, &ctx.translator);
    let lang = ctx.translator.init().await;
    log::debug!("About page in {}", lang);
    ctx.translator.apply_to_document();
    let translator = ctx.translator.clone();
    ctx.translator
        .on_language_changed(move |_| translator.apply_to_document())
        .detach();
    Ok(())
}
