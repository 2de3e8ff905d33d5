use crate::models::db_operations::{
    blog_db_operations, countries_db_operations, faqs_db_operations, pages_db_operations,
    visas_db_operations,
};
use crate::models::payloads::{BlogPostInput, CountryInput, FaqInput, PageInput, VisaProgramInput};
use crate::setup::db_setup::SetupError;
use rusqlite::Connection;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub countries: usize,
    pub visa_programs: usize,
    pub blog_posts: usize,
    pub faqs: usize,
    pub pages: usize,
}

fn country(slug: &str, names: (&str, &str), descriptions: (&str, &str), contents: (&str, &str), order: i64) -> CountryInput {
    CountryInput {
        slug: slug.to_string(),
        name_tr: names.0.to_string(),
        name_en: names.1.to_string(),
        description_tr: descriptions.0.to_string(),
        description_en: descriptions.1.to_string(),
        content_tr: contents.0.to_string(),
        content_en: contents.1.to_string(),
        flag_image: None,
        featured: true,
        order,
    }
}

fn sample_countries() -> Vec<CountryInput> {
    vec![
        country(
            "germany",
            ("Almanya", "Germany"),
            ("Avrupa'nın kalbinde çalışma ve yaşam fırsatları", "Work and living opportunities in the heart of Europe"),
            (
                "<p>Almanya, güçlü ekonomisi ve yüksek yaşam standartlarıyla dikkat çeker.</p>",
                "<p>Germany stands out with its strong economy and high living standards.</p>",
            ),
            1,
        ),
        country(
            "canada",
            ("Kanada", "Canada"),
            ("Çok kültürlü toplum ve yüksek yaşam kalitesi", "Multicultural society and high quality of life"),
            (
                "<p>Kanada, göçmenlere açık politikaları ve güçlü ekonomisiyle bilinir.</p>",
                "<p>Canada is known for its immigrant-friendly policies and strong economy.</p>",
            ),
            2,
        ),
        country(
            "uk",
            ("İngiltere", "United Kingdom"),
            ("Kaliteli eğitim ve kariyer fırsatları", "Quality education and career opportunities"),
            (
                "<p>İngiltere, dünya çapında tanınan üniversiteleri ve iş fırsatlarıyla öne çıkar.</p>",
                "<p>The UK stands out with its world-renowned universities and business opportunities.</p>",
            ),
            3,
        ),
        country(
            "netherlands",
            ("Hollanda", "Netherlands"),
            ("İnovasyon ve teknoloji merkezi", "Innovation and technology hub"),
            (
                "<p>Hollanda, startup dostu ekosistemi ve yüksek İngilizce seviyesiyle dikkat çeker.</p>",
                "<p>Netherlands stands out with its startup-friendly ecosystem and high English proficiency.</p>",
            ),
            4,
        ),
    ]
}

/// (country slug, program)
fn sample_programs() -> Vec<(&'static str, VisaProgramInput)> {
    let program = |slug: &str, titles: (&str, &str), excerpts: (&str, &str), contents: (&str, &str), visa_type: &str, order| {
        VisaProgramInput {
            slug: slug.to_string(),
            title_tr: titles.0.to_string(),
            title_en: titles.1.to_string(),
            excerpt_tr: excerpts.0.to_string(),
            excerpt_en: excerpts.1.to_string(),
            content_tr: contents.0.to_string(),
            content_en: contents.1.to_string(),
            visa_type: visa_type.to_string(),
            country_id: None,
            featured: true,
            order,
        }
    };

    vec![
        (
            "germany",
            program(
                "germany-eu-blue-card",
                ("Almanya AB Mavi Kart", "Germany EU Blue Card"),
                ("Yüksek nitelikli çalışanlar için özel vize programı", "Special visa program for highly qualified workers"),
                (
                    "<h2>Almanya AB Mavi Kart</h2><p>Yüksek nitelikli çalışanlar için tasarlanmış özel bir çalışma vizesidir.</p>",
                    "<h2>Germany EU Blue Card</h2><p>A special work visa designed for highly qualified workers.</p>",
                ),
                "work",
                1,
            ),
        ),
        (
            "canada",
            program(
                "canada-express-entry",
                ("Kanada Express Entry", "Canada Express Entry"),
                ("Kalifiye işçiler için hızlı göçmen vizesi", "Fast-track immigration for skilled workers"),
                (
                    "<h2>Kanada Express Entry</h2><p>Kalifiye işçiler için en hızlı göçmen vizesi programıdır.</p>",
                    "<h2>Canada Express Entry</h2><p>The fastest immigration program for skilled workers.</p>",
                ),
                "residence",
                2,
            ),
        ),
        (
            "uk",
            program(
                "uk-skilled-worker-visa",
                ("İngiltere Kalifiye İşçi Vizesi", "UK Skilled Worker Visa"),
                ("Nitelikli işler için çalışma vizesi", "Work visa for skilled jobs"),
                (
                    "<h2>İngiltere Kalifiye İşçi Vizesi</h2><p>İngiltere'de nitelikli bir işte çalışmak için gerekli vizedir.</p>",
                    "<h2>UK Skilled Worker Visa</h2><p>Required visa to work in a skilled job in the UK.</p>",
                ),
                "work",
                3,
            ),
        ),
    ]
}

fn sample_posts() -> Vec<BlogPostInput> {
    let post = |slug: &str, titles: (&str, &str), excerpts: (&str, &str), contents: (&str, &str), category: &str| {
        BlogPostInput {
            slug: slug.to_string(),
            title_tr: titles.0.to_string(),
            title_en: titles.1.to_string(),
            excerpt_tr: excerpts.0.to_string(),
            excerpt_en: excerpts.1.to_string(),
            content_tr: contents.0.to_string(),
            content_en: contents.1.to_string(),
            author: "Elma Vize".to_string(),
            category: category.to_string(),
            published: true,
            published_at: None,
        }
    };

    vec![
        post(
            "vize-basvurusu-icin-gerekenler",
            ("Vize Başvurusu İçin Gerekenler", "Requirements for Visa Application"),
            ("Vize başvurusu yaparken dikkat etmeniz gereken önemli noktalar", "Important points to consider when applying for a visa"),
            (
                "<p>Vize başvurusu yaparken doğru belgeleri hazırlamak çok önemlidir...</p>",
                "<p>Preparing the right documents when applying for a visa is very important...</p>",
            ),
            "Genel",
        ),
        post(
            "yurtdisinda-egitim-rehberi",
            ("Yurtdışında Eğitim Rehberi", "Guide to Studying Abroad"),
            ("Yurtdışında eğitim almak isteyenler için kapsamlı rehber", "Comprehensive guide for those who want to study abroad"),
            (
                "<p>Yurtdışında eğitim almak hayatınızı değiştirebilecek bir deneyimdir...</p>",
                "<p>Studying abroad is an experience that can change your life...</p>",
            ),
            "Eğitim",
        ),
    ]
}

fn sample_faqs() -> Vec<FaqInput> {
    let faq = |questions: (&str, &str), answers: (&str, &str), order| FaqInput {
        question_tr: questions.0.to_string(),
        question_en: questions.1.to_string(),
        answer_tr: answers.0.to_string(),
        answer_en: answers.1.to_string(),
        order,
        published: true,
    };

    vec![
        faq(
            ("Vize başvurusu ne kadar sürer?", "How long does visa application take?"),
            (
                "<p>Vize başvuru süreleri ülkeden ülkeye değişir. Genellikle 2-8 hafta arasında değişmektedir.</p>",
                "<p>Visa application times vary from country to country. It usually takes 2-8 weeks.</p>",
            ),
            1,
        ),
        faq(
            ("Hangi belgeler gereklidir?", "What documents are required?"),
            (
                "<p>Pasaport, fotoğraf, mali durum belgesi, sağlık sigortası ve başvuru formu temel belgelerdir.</p>",
                "<p>Passport, photo, financial statement, health insurance and application form are the basic documents.</p>",
            ),
            2,
        ),
        faq(
            ("Danışmanlık ücreti ne kadardır?", "What is the consultancy fee?"),
            (
                "<p>Danışmanlık ücretlerimiz başvuru türüne ve ülkeye göre değişmektedir. Detaylı bilgi için bizimle iletişime geçiniz.</p>",
                "<p>Our consultancy fees vary depending on the application type and country. Please contact us for detailed information.</p>",
            ),
            3,
        ),
    ]
}

fn sample_pages() -> Vec<PageInput> {
    let page = |slug: &str, titles: (&str, &str), contents: (&str, &str)| PageInput {
        slug: slug.to_string(),
        title_tr: titles.0.to_string(),
        title_en: titles.1.to_string(),
        content_tr: contents.0.to_string(),
        content_en: contents.1.to_string(),
    };

    vec![
        page(
            "about",
            ("Hakkımızda", "About Us"),
            (
                "<h2>Elma Vize Danışmanlık</h2><p>Yılların getirdiği deneyim ve uzmanlıkla, yurtdışı vize, eğitim ve iş danışmanlığı hizmetleri sunuyoruz.</p>",
                "<h2>Elma Visa Consultancy</h2><p>With years of experience and expertise, we provide visa, education and work consultancy services abroad.</p>",
            ),
        ),
        page(
            "education",
            ("Yurtdışı Eğitim", "Study Abroad"),
            (
                "<h2>Yurtdışı Eğitim Danışmanlığı</h2><p>Hayalinizdeki üniversiteye kabul almanız için size rehberlik ediyoruz.</p>",
                "<h2>Study Abroad Consultancy</h2><p>We guide you to get admission to your dream university.</p>",
            ),
        ),
        page(
            "work",
            ("Yurtdışı Çalışma", "Work Abroad"),
            (
                "<h2>Yurtdışı İş Danışmanlığı</h2><p>Yurtdışında çalışma hayallerinizi gerçeğe dönüştürmenize yardımcı oluyoruz.</p>",
                "<h2>Work Abroad Consultancy</h2><p>We help you make your overseas work dreams come true.</p>",
            ),
        ),
    ]
}

/// Fills an empty database with the sample site content. Refuses to run
/// when countries already exist so a live site is never duplicated into.
pub fn seed_sample_content(conn: &mut Connection) -> Result<SeedSummary, SetupError> {
    if countries_db_operations::count_countries(conn)? > 0 {
        return Err(SetupError::Message(
            "The database already contains content. Seeding is only allowed on an empty database.".to_string(),
        ));
    }

    let tx = conn.transaction()?;
    let mut summary = SeedSummary::default();

    let mut country_ids = Vec::new();
    for input in sample_countries() {
        let created = countries_db_operations::create_country(&tx, &input)?;
        log::info!("Seeded country '{}'", created.slug);
        country_ids.push((input.slug, created.id));
        summary.countries += 1;
    }

    for (country_slug, mut input) in sample_programs() {
        input.country_id = country_ids
            .iter()
            .find(|(slug, _)| slug == country_slug)
            .map(|(_, id)| id.clone());
        visas_db_operations::create_program(&tx, &input)?;
        summary.visa_programs += 1;
    }

    for input in sample_posts() {
        blog_db_operations::create_post(&tx, &input)?;
        summary.blog_posts += 1;
    }

    for input in sample_faqs() {
        faqs_db_operations::create_faq(&tx, &input)?;
        summary.faqs += 1;
    }

    for input in sample_pages() {
        pages_db_operations::create_page(&tx, &input)?;
        summary.pages += 1;
    }

    tx.commit()?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::db_operations::test_support;

    #[test]
    fn seeding_fills_every_table_once() {
        let mut conn = test_support::conn();
        let summary = seed_sample_content(&mut conn).unwrap();
        assert_eq!(
            summary,
            SeedSummary { countries: 4, visa_programs: 3, blog_posts: 2, faqs: 3, pages: 3 }
        );

        let blue_card = visas_db_operations::read_program_by_slug(&conn, "germany-eu-blue-card").unwrap();
        assert_eq!(blue_card.country.map(|c| c.slug), Some("germany".to_string()));

        assert!(matches!(seed_sample_content(&mut conn), Err(SetupError::Message(_))));
    }
}
