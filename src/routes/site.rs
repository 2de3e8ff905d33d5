use crate::helper::i18n_helpers::{visa_type_label, VISA_TYPES};
use crate::helper::site_helpers::{render_db_error, render_page, SitePage};
use crate::models::db_operations::{
    blog_db_operations, countries_db_operations, faqs_db_operations, pages_db_operations,
    visas_db_operations, DbError,
};
use crate::models::views::{BlogPostView, CountryView, FaqView, PageView, VisaProgramView};
use crate::models::Locale;
use crate::DbPool;
use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;
use tera::Tera;

const FEATURED_COUNTRIES: u32 = 6;
const FEATURED_PROGRAMS: u32 = 3;
/// The public blog index shows every published post.
const BLOG_PAGE_SIZE: u32 = 100;

/// Mounted under `/{locale}`.
pub fn config_site(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(home))
        .route("/", web::get().to(home))
        .route("/about", web::get().to(about))
        .route("/education", web::get().to(education))
        .route("/work", web::get().to(work))
        .route("/countries", web::get().to(countries))
        .route("/countries/{slug}", web::get().to(country_detail))
        .route("/visas", web::get().to(visas))
        .route("/visas/{slug}", web::get().to(visa_detail))
        .route("/blog", web::get().to(blog))
        .route("/blog/{slug}", web::get().to(blog_post))
        .route("/faq", web::get().to(faq))
        .route("/contact", web::get().to(contact))
        .route("/application", web::get().to(application));
}

pub async fn redirect_to_default_locale() -> impl Responder {
    HttpResponse::Found()
        .append_header(("location", format!("/{}", Locale::DEFAULT)))
        .finish()
}

#[derive(Serialize)]
struct VisaTypeOption {
    value: &'static str,
    label: String,
}

async fn home(page: SitePage, pool: web::Data<DbPool>, tera: web::Data<Tera>) -> HttpResponse {
    let SitePage { locale, mut ctx } = page;
    let data = pool.get().map_err(DbError::from).and_then(|conn| {
        Ok((
            countries_db_operations::read_featured_countries(&conn, FEATURED_COUNTRIES)?,
            visas_db_operations::read_featured_programs(&conn, FEATURED_PROGRAMS)?,
        ))
    });

    match data {
        Ok((countries, programs)) => {
            let countries: Vec<_> = countries.iter().map(|c| CountryView::new(c, locale)).collect();
            let programs: Vec<_> = programs.iter().map(|p| VisaProgramView::from_joined(p, locale)).collect();
            ctx.insert("countries", &countries);
            ctx.insert("programs", &programs);
            render_page(&tera, "site/home.html", &ctx)
        }
        Err(e) => render_db_error(&tera, &ctx, e),
    }
}

/// Renders one of the static content pages, optionally with the programs of a visa type.
async fn content_page(
    page: SitePage,
    pool: web::Data<DbPool>,
    tera: web::Data<Tera>,
    slug: &str,
    visa_type: Option<&str>,
) -> HttpResponse {
    let SitePage { locale, mut ctx } = page;
    let data = pool.get().map_err(DbError::from).and_then(|conn| {
        let content = match pages_db_operations::read_page_by_slug(&conn, slug) {
            Ok(page) => Some(page),
            Err(DbError::NotFound(_)) => None,
            Err(e) => return Err(e),
        };
        let programs = match visa_type {
            Some(t) => visas_db_operations::read_programs_by_type(&conn, t)?,
            None => Vec::new(),
        };
        Ok((content, programs))
    });

    match data {
        Ok((content, programs)) => {
            let content: Option<PageView> = content.as_ref().map(|p| PageView::new(p, locale));
            let programs: Vec<_> = programs.iter().map(|p| VisaProgramView::from_joined(p, locale)).collect();
            ctx.insert("page_slug", slug);
            ctx.insert("page", &content);
            ctx.insert("programs", &programs);
            render_page(&tera, "site/page.html", &ctx)
        }
        Err(e) => render_db_error(&tera, &ctx, e),
    }
}

async fn about(page: SitePage, pool: web::Data<DbPool>, tera: web::Data<Tera>) -> HttpResponse {
    content_page(page, pool, tera, "about", None).await
}

async fn education(page: SitePage, pool: web::Data<DbPool>, tera: web::Data<Tera>) -> HttpResponse {
    content_page(page, pool, tera, "education", Some("education")).await
}

async fn work(page: SitePage, pool: web::Data<DbPool>, tera: web::Data<Tera>) -> HttpResponse {
    content_page(page, pool, tera, "work", Some("work")).await
}

async fn countries(page: SitePage, pool: web::Data<DbPool>, tera: web::Data<Tera>) -> HttpResponse {
    let SitePage { locale, mut ctx } = page;
    let data = pool
        .get()
        .map_err(DbError::from)
        .and_then(|conn| countries_db_operations::read_countries_with_program_counts(&conn));

    match data {
        Ok(countries) => {
            let countries: Vec<_> = countries.iter().map(|c| CountryView::with_count(c, locale)).collect();
            ctx.insert("countries", &countries);
            render_page(&tera, "site/countries.html", &ctx)
        }
        Err(e) => render_db_error(&tera, &ctx, e),
    }
}

async fn country_detail(
    page: SitePage,
    path: web::Path<(String, String)>,
    pool: web::Data<DbPool>,
    tera: web::Data<Tera>,
) -> HttpResponse {
    let SitePage { locale, mut ctx } = page;
    let (_, slug) = path.into_inner();
    let data = pool
        .get()
        .map_err(DbError::from)
        .and_then(|conn| countries_db_operations::read_country_with_programs(&conn, &slug));

    match data {
        Ok(found) => {
            let country = CountryView::new(&found.country, locale);
            let programs: Vec<_> = found
                .visa_programs
                .iter()
                .map(|p| VisaProgramView::new(p, None, locale))
                .collect();
            ctx.insert("country", &country);
            ctx.insert("programs", &programs);
            render_page(&tera, "site/country.html", &ctx)
        }
        Err(e) => render_db_error(&tera, &ctx, e),
    }
}

async fn visas(page: SitePage, pool: web::Data<DbPool>, tera: web::Data<Tera>) -> HttpResponse {
    let SitePage { locale, mut ctx } = page;
    let data = pool
        .get()
        .map_err(DbError::from)
        .and_then(|conn| visas_db_operations::read_all_programs(&conn));

    match data {
        Ok(programs) => {
            let programs: Vec<_> = programs.iter().map(|p| VisaProgramView::from_joined(p, locale)).collect();
            ctx.insert("programs", &programs);
            render_page(&tera, "site/visas.html", &ctx)
        }
        Err(e) => render_db_error(&tera, &ctx, e),
    }
}

async fn visa_detail(
    page: SitePage,
    path: web::Path<(String, String)>,
    pool: web::Data<DbPool>,
    tera: web::Data<Tera>,
) -> HttpResponse {
    let SitePage { locale, mut ctx } = page;
    let (_, slug) = path.into_inner();
    let data = pool
        .get()
        .map_err(DbError::from)
        .and_then(|conn| visas_db_operations::read_program_by_slug(&conn, &slug));

    match data {
        Ok(found) => {
            ctx.insert("program", &VisaProgramView::from_joined(&found, locale));
            render_page(&tera, "site/visa.html", &ctx)
        }
        Err(e) => render_db_error(&tera, &ctx, e),
    }
}

async fn blog(page: SitePage, pool: web::Data<DbPool>, tera: web::Data<Tera>) -> HttpResponse {
    let SitePage { locale, mut ctx } = page;
    let data = pool
        .get()
        .map_err(DbError::from)
        .and_then(|conn| blog_db_operations::read_published_posts(&conn, BLOG_PAGE_SIZE, 0));

    match data {
        Ok(posts) => {
            let posts: Vec<_> = posts.iter().map(|p| BlogPostView::new(p, locale)).collect();
            ctx.insert("posts", &posts);
            render_page(&tera, "site/blog.html", &ctx)
        }
        Err(e) => render_db_error(&tera, &ctx, e),
    }
}

async fn blog_post(
    page: SitePage,
    path: web::Path<(String, String)>,
    pool: web::Data<DbPool>,
    tera: web::Data<Tera>,
) -> HttpResponse {
    let SitePage { locale, mut ctx } = page;
    let (_, slug) = path.into_inner();
    let data = pool
        .get()
        .map_err(DbError::from)
        .and_then(|conn| blog_db_operations::read_published_post_by_slug(&conn, &slug));

    match data {
        Ok(post) => {
            ctx.insert("post", &BlogPostView::new(&post, locale));
            render_page(&tera, "site/post.html", &ctx)
        }
        Err(e) => render_db_error(&tera, &ctx, e),
    }
}

async fn faq(page: SitePage, pool: web::Data<DbPool>, tera: web::Data<Tera>) -> HttpResponse {
    let SitePage { locale, mut ctx } = page;
    let data = pool
        .get()
        .map_err(DbError::from)
        .and_then(|conn| faqs_db_operations::read_published_faqs(&conn));

    match data {
        Ok(faqs) => {
            let faqs: Vec<_> = faqs.iter().map(|f| FaqView::new(f, locale)).collect();
            ctx.insert("faqs", &faqs);
            render_page(&tera, "site/faq.html", &ctx)
        }
        Err(e) => render_db_error(&tera, &ctx, e),
    }
}

async fn contact(page: SitePage, tera: web::Data<Tera>) -> HttpResponse {
    render_page(&tera, "site/contact.html", &page.ctx)
}

async fn application(page: SitePage, pool: web::Data<DbPool>, tera: web::Data<Tera>) -> HttpResponse {
    let SitePage { locale, mut ctx } = page;
    let data = pool.get().map_err(DbError::from).and_then(|conn| {
        Ok((
            countries_db_operations::read_countries_by_name(&conn)?,
            visas_db_operations::read_all_programs(&conn)?,
        ))
    });

    match data {
        Ok((countries, programs)) => {
            let countries: Vec<_> = countries.iter().map(|c| CountryView::new(c, locale)).collect();
            let programs: Vec<_> = programs.iter().map(|p| VisaProgramView::from_joined(p, locale)).collect();
            let visa_types: Vec<_> = VISA_TYPES
                .iter()
                .map(|&value| VisaTypeOption { value, label: visa_type_label(locale, value) })
                .collect();
            ctx.insert("countries", &countries);
            ctx.insert("programs", &programs);
            ctx.insert("visa_types", &visa_types);
            render_page(&tera, "site/application.html", &ctx)
        }
        Err(e) => render_db_error(&tera, &ctx, e),
    }
}
