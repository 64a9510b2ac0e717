mod common;

use anyhow::Result;
use axum::http::StatusCode;
use common::{body_string, location, TestApp};

const SEED_COUNT: usize = 6;

#[tokio::test]
async fn admin_creates_product() -> Result<()> {
    let app = TestApp::spawn().await?;
    let session = app.login("admin", "123").await?;

    let res = app
        .post_form("/admin/saveProduct", "name=souris2&price=300&quantity=10", Some(&session))
        .await?;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), Some("/user/products"));
    assert_eq!(app.product_count().await?, SEED_COUNT + 1);

    let products = app.state.products.find_all().await?;
    let created = products.iter().find(|p| p.name == "souris2").expect("new product listed");
    assert!(products.iter().filter(|p| p.id == created.id).count() == 1);
    assert_eq!((created.price, created.quantity), (300.0, 10));

    let page = body_string(app.get("/user/products", Some(&session)).await?).await?;
    assert!(page.contains("souris2"));
    Ok(())
}

#[tokio::test]
async fn user_cannot_create_product() -> Result<()> {
    let app = TestApp::spawn().await?;
    let session = app.login("user1", "123").await?;

    let res = app
        .post_form("/admin/saveProduct", "name=souris2&price=300&quantity=10", Some(&session))
        .await?;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), Some("/notAuthorized"));
    assert_eq!(app.product_count().await?, SEED_COUNT);
    Ok(())
}

#[tokio::test]
async fn invalid_products_are_rejected() -> Result<()> {
    let app = TestApp::spawn().await?;
    let session = app.login("admin", "123").await?;

    let cases = [
        ("name=&price=300&quantity=10", "Name must not be empty"),
        ("name=cable&price=-5&quantity=10", "Price must be greater than or equal to 0"),
        ("name=cable&price=5&quantity=0", "Quantity must be greater than or equal to 1"),
        ("name=cable&price=5&quantity=-3", "Quantity must be greater than or equal to 1"),
    ];

    for (form, message) in cases {
        let res = app.post_form("/admin/saveProduct", form, Some(&session)).await?;
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY, "{}", form);
        let page = body_string(res).await?;
        assert!(page.contains(message), "{} should report '{}'", form, message);
    }

    assert_eq!(app.product_count().await?, SEED_COUNT);
    Ok(())
}

#[tokio::test]
async fn update_form_is_prefilled() -> Result<()> {
    let app = TestApp::spawn().await?;
    let session = app.login("admin", "123").await?;
    let clavier = app
        .state
        .products
        .find_all()
        .await?
        .into_iter()
        .find(|p| p.name == "clavier")
        .expect("seeded clavier");

    let res = app
        .get(&format!("/admin/updateProduct?id={}", clavier.id), Some(&session))
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let page = body_string(res).await?;
    assert!(page.contains("value=\"clavier\""));
    assert!(page.contains("/admin/update"));
    Ok(())
}

#[tokio::test]
async fn update_form_for_unknown_id_is_not_found() -> Result<()> {
    let app = TestApp::spawn().await?;
    let session = app.login("admin", "123").await?;

    let res = app.get("/admin/updateProduct?id=9999", Some(&session)).await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert!(body_string(res).await?.contains("Product 9999 not found"));
    Ok(())
}

#[tokio::test]
async fn update_changes_fields_but_not_identity_or_selected() -> Result<()> {
    let app = TestApp::spawn().await?;
    let session = app.login("admin", "123").await?;
    let before = app
        .state
        .products
        .find_all()
        .await?
        .into_iter()
        .find(|p| p.name == "tablette")
        .expect("seeded tablette");

    let form = format!("id={}&name=tablette+pro&price=3500.5&quantity=4", before.id);
    let res = app.post_form("/admin/update", &form, Some(&session)).await?;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), Some("/user/products"));

    let after = app.state.products.find_by_id(before.id).await?;
    assert_eq!(after.id, before.id);
    assert_eq!(after.selected, before.selected);
    assert_eq!(after.name, "tablette pro");
    assert_eq!((after.price, after.quantity), (3500.5, 4));
    assert_eq!(app.product_count().await?, SEED_COUNT);
    Ok(())
}

#[tokio::test]
async fn invalid_update_redisplays_edit_form() -> Result<()> {
    let app = TestApp::spawn().await?;
    let session = app.login("admin", "123").await?;
    let before = app.state.products.find_all().await?.remove(0);

    let form = format!("id={}&name={}&price=-1&quantity=2", before.id, before.name);
    let res = app.post_form("/admin/update", &form, Some(&session)).await?;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let page = body_string(res).await?;
    assert!(page.contains("/admin/update"));
    assert!(page.contains("Price must be greater than or equal to 0"));

    assert_eq!(app.state.products.find_by_id(before.id).await?, before);
    Ok(())
}

#[tokio::test]
async fn update_of_unknown_id_is_not_found() -> Result<()> {
    let app = TestApp::spawn().await?;
    let session = app.login("admin", "123").await?;

    let res = app
        .post_form("/admin/update", "id=4242&name=x&price=1&quantity=1", Some(&session))
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(app.product_count().await?, SEED_COUNT);
    Ok(())
}

#[tokio::test]
async fn malformed_ids_render_error_page() -> Result<()> {
    let app = TestApp::spawn().await?;
    let session = app.login("admin", "123").await?;

    for uri in ["/admin/updateProduct?id=x", "/admin/updateProduct"] {
        let res = app.get(uri, Some(&session)).await?;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "{}", uri);
        assert!(body_string(res).await?.contains("Missing or invalid product id"), "{}", uri);
    }

    let res = app.post_form("/admin/delete", "id=x", Some(&session)).await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert!(body_string(res).await?.contains("Missing or invalid product id"));
    assert_eq!(app.product_count().await?, SEED_COUNT);
    Ok(())
}

#[tokio::test]
async fn update_with_bad_id_reports_every_field() -> Result<()> {
    let app = TestApp::spawn().await?;
    let session = app.login("admin", "123").await?;

    let res = app
        .post_form("/admin/update", "id=x&name=&price=1&quantity=1", Some(&session))
        .await?;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let page = body_string(res).await?;
    assert!(page.contains("missing or invalid product id"));
    assert!(page.contains("Name must not be empty"));
    assert_eq!(app.product_count().await?, SEED_COUNT);
    Ok(())
}

#[tokio::test]
async fn delete_is_idempotent() -> Result<()> {
    let app = TestApp::spawn().await?;
    let session = app.login("admin", "123").await?;
    let target = app.state.products.find_all().await?.remove(0);
    let form = format!("id={}", target.id);

    for _ in 0..2 {
        let res = app.post_form("/admin/delete", &form, Some(&session)).await?;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&res), Some("/user/products"));
    }

    assert_eq!(app.product_count().await?, SEED_COUNT - 1);
    let listing = body_string(app.get("/user/products", Some(&session)).await?).await?;
    assert!(!listing.contains(&format!("updateProduct?id={}\"", target.id)));
    assert!(listing.contains("updateProduct?id="), "other products still listed");
    Ok(())
}

#[tokio::test]
async fn user_cannot_delete_through_pages() -> Result<()> {
    let app = TestApp::spawn().await?;
    let session = app.login("user1", "123").await?;
    let target = app.state.products.find_all().await?.remove(0);

    let res = app
        .post_form("/admin/delete", &format!("id={}", target.id), Some(&session))
        .await?;
    assert_eq!(location(&res), Some("/notAuthorized"));
    assert_eq!(app.product_count().await?, SEED_COUNT);
    Ok(())
}
