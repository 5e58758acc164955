use crate::application::post_service::PostService;
use crate::domain::error::DomainError;
use crate::presentation::dto::{CreatePostRequest, PostView, UpdatePostRequest};
use actix_web::{HttpMessage, HttpRequest, HttpResponse, delete, get, post, put, web};
use tracing::info;
use uuid::Uuid;

#[get("/posts")]
pub async fn list_posts(
    req: HttpRequest,
    service: web::Data<PostService>,
) -> Result<HttpResponse, DomainError> {
    let posts = service.list_posts().await?;
    let views: Vec<PostView> = posts.into_iter().map(PostView::from).collect();

    info!(
        request_id = %request_id(&req),
        count = views.len(),
        "posts retrieved"
    );

    Ok(HttpResponse::Ok().json(views))
}

#[get("/posts/{id}")]
pub async fn get_post(
    service: web::Data<PostService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, DomainError> {
    let post = service.get_post(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(PostView::from(post)))
}

#[post("/posts")]
pub async fn create_post(
    req: HttpRequest,
    service: web::Data<PostService>,
    payload: web::Json<CreatePostRequest>,
) -> Result<HttpResponse, DomainError> {
    let payload = payload.into_inner();
    let post = service
        .create_post(payload.author, payload.title, payload.content)
        .await?;

    info!(
        request_id = %request_id(&req),
        post_id = %post.id,
        "post created"
    );

    Ok(HttpResponse::Created().json(PostView::from(post)))
}

#[put("/posts/{id}")]
pub async fn update_post(
    req: HttpRequest,
    service: web::Data<PostService>,
    payload: web::Json<UpdatePostRequest>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, DomainError> {
    let post_id = path.into_inner();
    let payload = payload.into_inner();

    // The body must name the same resource as the path.
    if payload.id != Some(post_id) {
        return Err(DomainError::IdMismatch);
    }

    let post = service.update_post(post_id, payload.into_patch()).await?;

    info!(
        request_id = %request_id(&req),
        post_id = %post.id,
        "post updated"
    );

    Ok(HttpResponse::NoContent().finish())
}

#[delete("/posts/{id}")]
pub async fn delete_post(
    req: HttpRequest,
    service: web::Data<PostService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, DomainError> {
    let post_id = path.into_inner();
    service.delete_post(post_id).await?;

    info!(
        request_id = %request_id(&req),
        post_id = %post_id,
        "post deleted"
    );

    Ok(HttpResponse::NoContent().finish())
}

fn request_id(req: &HttpRequest) -> String {
    req.extensions()
        .get::<crate::presentation::middleware::RequestId>()
        .map(|rid| rid.0.clone())
        .unwrap_or_else(|| "unknown".into())
}
