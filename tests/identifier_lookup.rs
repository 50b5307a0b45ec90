// tests/identifier_lookup.rs
use std::sync::Arc;

mod support;

use mokkan_sluggable::domain::sluggable::{IdentifierResolver, LookupTarget};
use mokkan_sluggable::infrastructure::repositories::InMemoryDocumentRepository;
use mokkan_sluggable::{Document, DocumentId, DomainError, Filter, Lookup, SlugConfig};
use support::{
    ACCOUNT_ID, ArticleBuilder, CountingRead, SLUG, article, default_config, field, memory_model,
    slug_of,
};

fn id_of(document: &Document) -> String {
    document.id().map(ToString::to_string).unwrap_or_default()
}

#[tokio::test]
async fn lone_slug_finds_the_document() {
    let (model, _repo) = memory_model(default_config()).await;
    let mut doc = article("Hello World");
    model.save(&mut doc).await.unwrap();

    let found = model.find(&["hello-world"]).await.unwrap();
    assert_eq!(found, Lookup::Single(Some(doc)));
}

#[tokio::test]
async fn lone_identifier_uses_native_lookup() {
    let (model, _repo) = memory_model(default_config()).await;
    let mut doc = article("Hello World");
    model.save(&mut doc).await.unwrap();

    let found = model.find(&[id_of(&doc)]).await.unwrap();
    assert_eq!(found.into_single(), Some(doc.clone()));

    // Identifier matching ignores hex case.
    let upper = id_of(&doc).to_uppercase();
    let found = model.find(&[upper]).await.unwrap();
    assert_eq!(found.into_single(), Some(doc));
}

#[tokio::test]
async fn several_arguments_are_identifiers() {
    let (model, _repo) = memory_model(default_config()).await;
    let mut a = article("Alpha");
    let mut b = article("Beta");
    model.save(&mut a).await.unwrap();
    model.save(&mut b).await.unwrap();

    let found = model.find(&[id_of(&b), id_of(&a)]).await.unwrap();
    assert_eq!(found, Lookup::Many(vec![b, a]));

    // Slugs are never consulted once there is more than one argument.
    let found = model.find(&["alpha", "beta"]).await.unwrap();
    assert_eq!(found, Lookup::Many(vec![]));
}

#[tokio::test]
async fn missing_slug_is_none_and_required_reports_not_found() {
    let (model, _repo) = memory_model(default_config()).await;

    let found = model.find(&["nothing-here"]).await.unwrap();
    assert_eq!(found, Lookup::Single(None));
    assert!(matches!(
        model.find(&["nothing-here"]).await.unwrap().required(),
        Err(DomainError::NotFound(_))
    ));
}

#[tokio::test]
async fn empty_argument_list_finds_nothing() {
    let (model, _repo) = memory_model(default_config()).await;
    model.save(&mut article("Something")).await.unwrap();

    let none: [&str; 0] = [];
    assert_eq!(model.find(&none).await.unwrap(), Lookup::Single(None));
}

#[tokio::test]
async fn hex_looking_slug_is_treated_as_identifier() {
    // A 24-hex slug is indistinguishable from an identifier.
    let (model, _repo) = memory_model(default_config()).await;
    let mut doc = ArticleBuilder::new()
        .title("Hex")
        .slug("deadbeefdeadbeefdeadbeef")
        .build();
    model.save(&mut doc).await.unwrap();

    let found = model.find(&["deadbeefdeadbeefdeadbeef"]).await.unwrap();
    assert_eq!(found, Lookup::Single(None));
}

#[tokio::test]
async fn numeric_argument_is_a_slug() {
    let config = SlugConfig::builder("year").build().unwrap();
    let (model, _repo) = memory_model(config).await;
    let mut doc = Document::new().with(&field("year"), 1999);
    model.save(&mut doc).await.unwrap();

    let found = model.find(&[1999]).await.unwrap();
    assert_eq!(found.into_single(), Some(doc));
}

#[tokio::test]
async fn scoped_slug_lookup() {
    let config = SlugConfig::builder("title")
        .scope_field("account_id")
        .build()
        .unwrap();
    let (model, _repo) = memory_model(config).await;

    let mut first = ArticleBuilder::new().title("Roadmap").account_id(1).build();
    let mut second = ArticleBuilder::new().title("Roadmap").account_id(2).build();
    model.save(&mut first).await.unwrap();
    model.save(&mut second).await.unwrap();
    assert_eq!(slug_of(&first), slug_of(&second));

    let in_second = model
        .find_by_slug_in("roadmap", Filter::new().field_eq(ACCOUNT_ID.clone(), 2))
        .await
        .unwrap();
    assert_eq!(in_second.into_single(), Some(second));

    let in_third = model
        .find_by_slug_in("roadmap", Filter::new().field_eq(ACCOUNT_ID.clone(), 3))
        .await
        .unwrap();
    assert_eq!(in_third, Lookup::Single(None));
}

#[tokio::test]
async fn dispatch_hits_exactly_one_query() {
    let repo = Arc::new(InMemoryDocumentRepository::new());
    let stored = {
        use mokkan_sluggable::domain::document::DocumentWriteRepository;
        repo.insert(&Document::new().with(&SLUG, "kept")).await.unwrap()
    };

    let counting = Arc::new(CountingRead::new(repo));
    let resolver = IdentifierResolver::new(Arc::new(default_config()), counting.clone());

    resolver.find(&["kept"]).await.unwrap();
    assert_eq!(counting.counts(), (0, 1, 0));

    resolver.find(&[id_of(&stored)]).await.unwrap();
    assert_eq!(counting.counts(), (0, 1, 1));

    resolver.find(&["kept", "other"]).await.unwrap();
    assert_eq!(counting.counts(), (0, 1, 2));
}

#[test]
fn classification_rules() {
    let id = DocumentId::generate().to_string();
    assert_eq!(
        LookupTarget::classify(&[id.as_str()]),
        LookupTarget::Identifiers(vec![id.clone()])
    );
    assert_eq!(
        LookupTarget::classify(&["my-post"]),
        LookupTarget::Slug("my-post".into())
    );
    // 23 hex characters is not an identifier.
    assert_eq!(
        LookupTarget::classify(&[&id[1..]]),
        LookupTarget::Slug(id[1..].to_string())
    );
    assert_eq!(
        LookupTarget::classify(&["a", "b"]),
        LookupTarget::Identifiers(vec!["a".into(), "b".into()])
    );
}

#[tokio::test]
async fn to_param_prefers_slug_then_identifier() {
    let (model, _repo) = memory_model(default_config()).await;

    let mut titled = article("Public Name");
    model.save(&mut titled).await.unwrap();
    assert_eq!(model.to_param(&titled), "public-name");

    let mut untitled = ArticleBuilder::new().untitled().build();
    model.save(&mut untitled).await.unwrap();
    assert_eq!(model.to_param(&untitled), id_of(&untitled));

    assert_eq!(model.to_param(&ArticleBuilder::new().untitled().build()), "");
}
