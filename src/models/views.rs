//! Locale-resolved shapes handed to the site templates.

use crate::helper::i18n_helpers::visa_type_label;
use crate::models::{
    BlogPost, Country, CountryWithProgramCount, Faq, Locale, Page, VisaProgram,
    VisaProgramWithCountry,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Serialize, Clone)]
pub struct CountryView {
    pub id: String,
    pub slug: String,
    pub name: String,
    pub description: String,
    pub content: String,
    pub flag_image: Option<String>,
    pub program_count: Option<i64>,
}

#[derive(Debug, Serialize, Clone)]
pub struct VisaProgramView {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub visa_type: String,
    pub visa_type_label: String,
    pub country: Option<CountryView>,
}

#[derive(Debug, Serialize, Clone)]
pub struct BlogPostView {
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub author: String,
    pub category: String,
    pub published_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Clone)]
pub struct FaqView {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Serialize, Clone)]
pub struct PageView {
    pub slug: String,
    pub title: String,
    pub content: String,
}

impl CountryView {
    pub fn new(country: &Country, locale: Locale) -> Self {
        CountryView {
            id: country.id.clone(),
            slug: country.slug.clone(),
            name: locale.pick(&country.name_tr, &country.name_en).to_string(),
            description: locale.pick(&country.description_tr, &country.description_en).to_string(),
            content: locale.pick(&country.content_tr, &country.content_en).to_string(),
            flag_image: country.flag_image.clone(),
            program_count: None,
        }
    }

    pub fn with_count(item: &CountryWithProgramCount, locale: Locale) -> Self {
        CountryView {
            program_count: Some(item.program_count),
            ..CountryView::new(&item.country, locale)
        }
    }
}

impl VisaProgramView {
    pub fn new(program: &VisaProgram, country: Option<&Country>, locale: Locale) -> Self {
        VisaProgramView {
            id: program.id.clone(),
            slug: program.slug.clone(),
            title: locale.pick(&program.title_tr, &program.title_en).to_string(),
            excerpt: locale.pick(&program.excerpt_tr, &program.excerpt_en).to_string(),
            content: locale.pick(&program.content_tr, &program.content_en).to_string(),
            visa_type: program.visa_type.clone(),
            visa_type_label: visa_type_label(locale, &program.visa_type),
            country: country.map(|c| CountryView::new(c, locale)),
        }
    }

    pub fn from_joined(item: &VisaProgramWithCountry, locale: Locale) -> Self {
        VisaProgramView::new(&item.program, item.country.as_ref(), locale)
    }
}

impl BlogPostView {
    pub fn new(post: &BlogPost, locale: Locale) -> Self {
        BlogPostView {
            slug: post.slug.clone(),
            title: locale.pick(&post.title_tr, &post.title_en).to_string(),
            excerpt: locale.pick(&post.excerpt_tr, &post.excerpt_en).to_string(),
            content: locale.pick(&post.content_tr, &post.content_en).to_string(),
            author: post.author.clone(),
            category: post.category.clone(),
            published_at: post.published_at,
        }
    }
}

impl FaqView {
    pub fn new(faq: &Faq, locale: Locale) -> Self {
        FaqView {
            question: locale.pick(&faq.question_tr, &faq.question_en).to_string(),
            answer: locale.pick(&faq.answer_tr, &faq.answer_en).to_string(),
        }
    }
}

impl PageView {
    pub fn new(page: &Page, locale: Locale) -> Self {
        PageView {
            slug: page.slug.clone(),
            title: locale.pick(&page.title_tr, &page.title_en).to_string(),
            content: locale.pick(&page.content_tr, &page.content_en).to_string(),
        }
    }
}
