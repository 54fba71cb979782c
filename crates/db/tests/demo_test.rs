//! Integration tests for the demo Author/Book tables.

mod common;

use salesdb_db::{AuthorRepository, RepositoryError};

#[tokio::test]
async fn test_book_survives_author_deletion() {
    let db = common::setup().await;
    let repo = AuthorRepository::new(db.clone());

    let author = repo
        .create_author(&common::unique("Author"))
        .await
        .expect("Failed to create author");
    let book = repo
        .create_book("Book", Some(author.id))
        .await
        .expect("Failed to create book");
    assert_eq!(book.author_id, Some(author.id));

    let books = repo.books_by_author(author.id).await.unwrap();
    assert_eq!(books.len(), 1);

    repo.delete_author(author.id)
        .await
        .expect("Failed to delete author");

    let reloaded = repo
        .find_book(book.id)
        .await
        .expect("Failed to load book")
        .expect("Book should still exist");
    assert_eq!(reloaded.author_id, None);
}

#[tokio::test]
async fn test_book_with_unknown_author_is_rejected() {
    let db = common::setup().await;
    let repo = AuthorRepository::new(db.clone());

    let result = repo.create_book("Orphan", Some(i64::MAX)).await;
    assert!(matches!(result, Err(RepositoryError::ForeignKeyViolation(_))));

    let missing = repo.delete_author(i64::MAX).await;
    assert!(matches!(missing, Err(RepositoryError::NotFound { .. })));
}
