//! Catalog commands: list, show, categories, and the admin mutations.

use std::path::PathBuf;

use anyhow::Result;
use bookverse_core::api::books;
use bookverse_core::catalog::{Book, BookDraft, CATEGORY_ALL, FilterCriteria, filter_books};

use super::{build_api, build_session};
use crate::cli::BooksCommands;

pub async fn dispatch(command: BooksCommands) -> Result<()> {
    match command {
        BooksCommands::List {
            category,
            search,
            featured,
        } => list(category, search, featured).await,
        BooksCommands::Show { id } => show(&id).await,
        BooksCommands::Categories => categories().await,
        BooksCommands::Add {
            title,
            author,
            description,
            price,
            category,
            featured,
            cta,
            cover,
        } => {
            add(BookDraft {
                title,
                author,
                description,
                price,
                category,
                is_featured: featured,
                cta_button_text: cta,
                cover_image: cover,
            })
            .await
        }
        BooksCommands::Edit {
            id,
            title,
            author,
            description,
            price,
            category,
            featured,
            cta,
            cover,
        } => {
            edit(
                &id,
                EditFields {
                    title,
                    author,
                    description,
                    price,
                    category,
                    featured,
                    cta,
                    cover,
                },
            )
            .await
        }
        BooksCommands::Delete { id } => delete(&id).await,
    }
}

async fn list(category: Option<String>, search: Option<String>, featured: bool) -> Result<()> {
    let api = build_api()?;
    let all = books::list_books(&api).await?;

    let criteria = FilterCriteria {
        category: category.unwrap_or_else(|| CATEGORY_ALL.to_string()),
        query: search.unwrap_or_default(),
        featured_only: featured,
    };
    let visible = filter_books(&all, &criteria);

    if visible.is_empty() {
        println!("No books match.");
        return Ok(());
    }

    for book in visible {
        let star = if book.is_featured { "★" } else { " " };
        println!(
            "{:<36}  {star} {:<30}  {:<20}  {:<12}  ${:.2}",
            book.id,
            book.title,
            book.author,
            book.category,
            book.price
        );
    }
    Ok(())
}

async fn show(id: &str) -> Result<()> {
    let api = build_api()?;
    let book = books::get_book(&api, id).await?;
    print_book(&book, api.base_url());
    Ok(())
}

async fn categories() -> Result<()> {
    let api = build_api()?;
    let categories = books::list_categories(&api).await?;
    if categories.is_empty() {
        println!("No categories in use.");
        return Ok(());
    }
    for category in categories {
        println!("{category}");
    }
    Ok(())
}

async fn add(draft: BookDraft) -> Result<()> {
    let (api, mut session) = build_session()?;
    session.initialize().await;

    let book = books::create_book(&api, &draft).await?;
    println!("Created {} ({})", book.title, book.id);
    Ok(())
}

struct EditFields {
    title: Option<String>,
    author: Option<String>,
    description: Option<String>,
    price: Option<f64>,
    category: Option<String>,
    featured: Option<bool>,
    cta: Option<String>,
    cover: Option<PathBuf>,
}

async fn edit(id: &str, fields: EditFields) -> Result<()> {
    let (api, mut session) = build_session()?;
    session.initialize().await;

    // Omitted fields keep their current value: fetch, overlay, submit.
    let current = books::get_book(&api, id).await?;
    let mut draft = BookDraft::from_book(&current);
    if let Some(title) = fields.title {
        draft.title = title;
    }
    if let Some(author) = fields.author {
        draft.author = author;
    }
    if let Some(description) = fields.description {
        draft.description = description;
    }
    if let Some(price) = fields.price {
        draft.price = price;
    }
    if let Some(category) = fields.category {
        draft.category = category;
    }
    if let Some(featured) = fields.featured {
        draft.is_featured = featured;
    }
    if let Some(cta) = fields.cta {
        draft.cta_button_text = cta;
    }
    draft.cover_image = fields.cover;

    let book = books::update_book(&api, id, &draft).await?;
    println!("Updated {} ({})", book.title, book.id);
    Ok(())
}

async fn delete(id: &str) -> Result<()> {
    let (api, mut session) = build_session()?;
    session.initialize().await;

    books::delete_book(&api, id).await?;
    println!("Deleted {id}");
    Ok(())
}

fn print_book(book: &Book, base_url: &str) {
    println!("{}", book.title);
    println!("by {}", book.author);
    println!();
    println!("id:        {}", book.id);
    println!("category:  {}", book.category);
    println!("price:     ${:.2}", book.price);
    println!("featured:  {}", book.is_featured);
    println!("cta:       {}", book.cta_button_text);
    match book.cover_image_url(base_url) {
        Some(url) => println!("cover:     {url}"),
        None => println!("cover:     (none)"),
    }
    if !book.description.is_empty() {
        println!();
        println!("{}", book.description);
    }
}
