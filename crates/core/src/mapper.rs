//! Shape mapping from raw CMS entities to view models.
//!
//! Every function here is pure and infallible. Absent data degrades to
//! defaults; a page whose required header block is missing maps to `None`
//! so the caller can fall back to static data.

use scraper::Html;

use crate::acf::{
    AboutAcf, AboutBlock, AcfImage, AcfLink, ApplicationBlock, ApplicationContentBlock, ApplicationsAcf,
    ApplicationsBlock, BlogAcf, BlogBlock, CardData, ContactAcf, ContactBlock, ContactDetailsData, CtaData,
    DescriptionData, FeatureData, HeroData, HomeAcf, HomeBlock, InfoAcf, RawCategory, RawPage, RawPost, ServiceBlock,
    ServiceContentBlock, ServicesAcf, ServicesBlock,
};
use crate::slots::{APPLICATION_SLOTS, SERVICE_SLOTS, SlotTable};
use crate::view::*;

/// Reduces rendered HTML to plain text: tags removed, entities decoded,
/// whitespace collapsed.
pub fn plain_text(html: &str) -> String {
    let text = if html.contains('<') || html.contains('&') {
        Html::parse_fragment(html).root_element().text().collect::<String>()
    } else {
        html.to_string()
    };
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() { None } else { Some(value.to_string()) }
}

pub fn map_image(image: Option<&AcfImage>) -> Option<Image> {
    let image = image?;
    let url = non_empty(&image.url)?;
    Some(Image { url, alt: image.alt.trim().to_string(), width: image.width, height: image.height })
}

pub fn map_link(link: Option<&AcfLink>) -> Option<Link> {
    let link = link?;
    let url = non_empty(&link.url)?;
    Some(Link { title: plain_text(&link.title), url, target: non_empty(&link.target) })
}

pub fn map_hero(hero: &HeroData) -> Hero {
    Hero {
        title: plain_text(&hero.title),
        subtitle: plain_text(&hero.subtitle),
        description: hero.description.trim().to_string(),
        image: map_image(hero.image.as_ref()),
        cta: map_link(hero.cta.as_ref()),
    }
}

fn map_card(card: &CardData) -> Card {
    Card {
        title: plain_text(&card.title),
        description: card.description.trim().to_string(),
        image: map_image(card.image.as_ref()),
        link: map_link(card.link.as_ref()),
    }
}

/// Maps a feature, keeping only sub-points that have both a title and a body.
pub fn map_feature(feature: &FeatureData) -> Feature {
    let points = feature
        .points
        .iter()
        .filter(|point| !point.title.trim().is_empty() && !point.description.trim().is_empty())
        .map(|point| FeaturePoint { title: point.title.clone(), description: point.description.clone() })
        .collect();

    Feature {
        title: plain_text(&feature.title),
        description: feature.description.trim().to_string(),
        icon: map_image(feature.icon.as_ref()),
        points,
    }
}

/// Flattens description sections into one ordered list of blocks.
pub fn flatten_description<'a>(sections: impl IntoIterator<Item = &'a DescriptionData>) -> Vec<DescriptionBlock> {
    sections
        .into_iter()
        .flat_map(|section| {
            let heading = plain_text(&section.heading);
            section.description_blocks.iter().filter_map(move |block| {
                let title = plain_text(&block.title);
                let text = block.text.trim().to_string();
                if title.is_empty() && text.is_empty() {
                    return None;
                }
                Some(DescriptionBlock { section: heading.clone(), title, text })
            })
        })
        .collect()
}

fn map_cta(cta: &CtaData) -> CallToAction {
    CallToAction {
        title: plain_text(&cta.title),
        description: cta.description.trim().to_string(),
        link: map_link(cta.link.as_ref()),
    }
}

fn map_details(details: &ContactDetailsData) -> ContactDetails {
    ContactDetails {
        email: details.email.trim().to_string(),
        phone: details.phone.trim().to_string(),
        address: details.address.trim().to_string(),
        hours: details.hours.trim().to_string(),
        map_url: non_empty(&details.map_url),
    }
}

pub fn map_home(page: &RawPage) -> Option<HomeViewModel> {
    let acf: HomeAcf = page.acf();
    let mut hero = None;
    let mut view = HomeViewModel::default();

    for block in &acf.home_content {
        match block {
            HomeBlock::HeroData(data) => {
                hero.get_or_insert_with(|| map_hero(data));
            }
            HomeBlock::ServiceCardData(card) => view.services.push(map_card(card)),
            HomeBlock::ApplicationCardData(card) => view.applications.push(map_card(card)),
            HomeBlock::TestimonialData(t) => view.testimonials.push(Testimonial {
                quote: t.quote.trim().to_string(),
                author: plain_text(&t.author),
                company: plain_text(&t.company),
                avatar: map_image(t.avatar.as_ref()),
            }),
            HomeBlock::ClientLogoData(client) => view
                .clients
                .push(ClientLogo { name: plain_text(&client.name), logo: map_image(client.logo.as_ref()) }),
            HomeBlock::StatData(stat) => {
                view.stats.push(Stat { value: stat.value.trim().to_string(), label: plain_text(&stat.label) })
            }
            HomeBlock::Unknown => {}
        }
    }

    view.hero = hero?;
    Some(view)
}

/// Service entries of the services page, in CMS order.
pub fn service_blocks(page: &RawPage) -> (Option<HeroData>, Vec<ServiceBlock>) {
    let acf: ServicesAcf = page.acf();
    let mut hero = None;
    let mut items = Vec::new();
    for block in acf.services.into_inner() {
        match block {
            ServicesBlock::HeroData(data) => {
                hero.get_or_insert(data);
            }
            ServicesBlock::ServiceData(item) => items.push(item),
            ServicesBlock::Unknown => {}
        }
    }
    (hero, items)
}

/// Application entries of the applications page, in CMS order.
pub fn application_blocks(page: &RawPage) -> (Option<HeroData>, Vec<ApplicationBlock>) {
    let acf: ApplicationsAcf = page.acf();
    let mut hero = None;
    let mut items = Vec::new();
    for block in acf.applications.into_inner() {
        match block {
            ApplicationsBlock::HeroData(data) => {
                hero.get_or_insert(data);
            }
            ApplicationsBlock::ApplicationData(item) => items.push(item),
            ApplicationsBlock::Unknown => {}
        }
    }
    (hero, items)
}

fn index_card<T: crate::slots::Keyed>(
    table: &SlotTable, base: &str, position: usize, item: &T, description: &str, icon: Option<&AcfImage>,
) -> Card {
    let title = plain_text(item.title());
    let link = table
        .slug_for(position, item)
        .map(|slug| Link { title: title.clone(), url: format!("/{}/{}", base, slug), target: None });
    Card { title, description: description.trim().to_string(), image: map_image(icon), link }
}

pub fn map_services_index(page: &RawPage) -> Option<ServicesIndexViewModel> {
    let (hero, items) = service_blocks(page);
    let services = items
        .iter()
        .enumerate()
        .map(|(pos, item)| index_card(&SERVICE_SLOTS, "services", pos, item, &item.short_description, item.icon.as_ref()))
        .collect();
    Some(ServicesIndexViewModel { hero: map_hero(&hero?), services })
}

pub fn map_applications_index(page: &RawPage) -> Option<ApplicationsIndexViewModel> {
    let (hero, items) = application_blocks(page);
    let applications = items
        .iter()
        .enumerate()
        .map(|(pos, item)| {
            index_card(&APPLICATION_SLOTS, "applications", pos, item, &item.short_description, item.icon.as_ref())
        })
        .collect();
    Some(ApplicationsIndexViewModel { hero: map_hero(&hero?), applications })
}

/// Maps one service entry; `None` when it has no `service_hero_data` block.
pub fn map_service(slug: &str, service: &ServiceBlock) -> Option<ServiceViewModel> {
    let mut hero = None;
    let mut view = ServiceViewModel { slug: slug.to_string(), ..Default::default() };
    let mut sections = Vec::new();

    for block in &service.content {
        match block {
            ServiceContentBlock::ServiceHeroData(data) => {
                hero.get_or_insert_with(|| map_hero(data));
            }
            ServiceContentBlock::FeatureData(feature) => view.features.push(map_feature(feature)),
            ServiceContentBlock::DescriptionData(section) => sections.push(section),
            ServiceContentBlock::TechnologyData(tech) => view
                .technologies
                .push(Technology { name: tech.name.trim().to_string(), logo: map_image(tech.logo.as_ref()) }),
            ServiceContentBlock::CtaData(cta) => {
                view.cta.get_or_insert_with(|| map_cta(cta));
            }
            ServiceContentBlock::Unknown => {}
        }
    }

    let hero = hero?;
    view.description = flatten_description(sections);
    view.title = non_empty(&plain_text(&service.title)).unwrap_or_else(|| hero.title.clone());
    view.hero = hero;
    Some(view)
}

/// Maps one application entry; `None` when it has no `application_hero_data` block.
pub fn map_application(slug: &str, application: &ApplicationBlock) -> Option<ApplicationViewModel> {
    let mut hero = None;
    let mut view = ApplicationViewModel { slug: slug.to_string(), ..Default::default() };

    for block in &application.content {
        match block {
            ApplicationContentBlock::ApplicationHeroData(data) => {
                hero.get_or_insert_with(|| map_hero(data));
            }
            ApplicationContentBlock::FeatureData(feature) => view.features.push(map_feature(feature)),
            ApplicationContentBlock::BenefitData(benefit) => view.benefits.push(Benefit {
                title: plain_text(&benefit.title),
                description: benefit.description.trim().to_string(),
            }),
            ApplicationContentBlock::ScreenshotData(shots) => {
                let caption = plain_text(&shots.caption);
                view.screenshots.extend(
                    shots
                        .images
                        .iter()
                        .filter_map(|image| map_image(Some(image)))
                        .map(|image| Screenshot { caption: caption.clone(), image }),
                );
            }
            ApplicationContentBlock::IndustryData(industry) => view.industries.push(industry.name.trim().to_string()),
            ApplicationContentBlock::CtaData(cta) => {
                view.cta.get_or_insert_with(|| map_cta(cta));
            }
            ApplicationContentBlock::Unknown => {}
        }
    }

    let hero = hero?;
    view.title = non_empty(&plain_text(&application.title)).unwrap_or_else(|| hero.title.clone());
    view.hero = hero;
    Some(view)
}

pub fn map_about(page: &RawPage) -> Option<AboutViewModel> {
    let acf: AboutAcf = page.acf();
    let mut hero = None;
    let mut view = AboutViewModel::default();

    for block in &acf.about_content {
        match block {
            AboutBlock::HeroData(data) => {
                hero.get_or_insert_with(|| map_hero(data));
            }
            AboutBlock::StoryData(story) => view.story.push(Story {
                heading: plain_text(&story.heading),
                text: story.text.trim().to_string(),
                image: map_image(story.image.as_ref()),
            }),
            AboutBlock::MemberData(member) => view.members.push(Member {
                name: plain_text(&member.name),
                role: plain_text(&member.role),
                bio: member.bio.trim().to_string(),
                photo: map_image(member.photo.as_ref()),
                linkedin: non_empty(&member.linkedin),
            }),
            AboutBlock::ValueData(value) => view.values.push(Benefit {
                title: plain_text(&value.title),
                description: value.description.trim().to_string(),
            }),
            AboutBlock::Unknown => {}
        }
    }

    view.hero = hero?;
    Some(view)
}

fn contact_parts(page: &RawPage) -> (Option<Hero>, Option<ContactDetails>, Vec<SocialLink>) {
    let acf: ContactAcf = page.acf();
    let mut hero = None;
    let mut details = None;
    let mut social = Vec::new();

    for block in &acf.contact_content {
        match block {
            ContactBlock::HeroData(data) => {
                hero.get_or_insert_with(|| map_hero(data));
            }
            ContactBlock::ContactDetailsData(data) => {
                details.get_or_insert_with(|| map_details(data));
            }
            ContactBlock::SocialLinkData(link) => {
                if let Some(url) = non_empty(&link.url) {
                    social.push(SocialLink { platform: link.platform.trim().to_lowercase(), url });
                }
            }
            ContactBlock::Unknown => {}
        }
    }

    (hero, details, social)
}

pub fn map_contact(page: &RawPage) -> Option<ContactViewModel> {
    let (hero, details, social) = contact_parts(page);
    Some(ContactViewModel { hero: hero?, details: details.unwrap_or_default(), social })
}

/// Site-wide social links and footer contact block, taken from the contact page.
///
/// Never fails: missing sections are simply empty.
pub fn map_site_chrome(page: &RawPage) -> SiteChrome {
    let (_, contact, social) = contact_parts(page);
    SiteChrome { social, contact }
}

pub fn map_info_page(page: &RawPage) -> InfoPageViewModel {
    let acf: InfoAcf = page.acf();
    InfoPageViewModel {
        slug: page.slug.clone(),
        title: plain_text(&page.title.rendered),
        last_updated: acf.last_updated.trim().to_string(),
        content_html: page.content.rendered.clone(),
    }
}

pub fn map_category(category: &RawCategory) -> Category {
    Category {
        id: category.id,
        name: plain_text(&category.name),
        slug: category.slug.clone(),
        description: category.description.trim().to_string(),
    }
}

pub fn map_post_card(post: &RawPost) -> PostCard {
    let image = post.embedded.featured_media.iter().find_map(|media| {
        let url = non_empty(&media.source_url)?;
        Some(Image {
            url,
            alt: media.alt_text.trim().to_string(),
            width: media.media_details.width,
            height: media.media_details.height,
        })
    });

    let categories = post
        .embedded
        .terms
        .iter()
        .flat_map(|group| group.iter())
        .filter(|term| term.taxonomy == "category")
        .map(|term| Category { id: term.id, name: plain_text(&term.name), slug: term.slug.clone(), description: String::new() })
        .collect();

    PostCard {
        id: post.id,
        slug: post.slug.clone(),
        title: plain_text(&post.title.rendered),
        excerpt: plain_text(&post.excerpt.rendered),
        date: post.date.clone(),
        author: post.embedded.author.first().map(|a| plain_text(&a.name)).unwrap_or_default(),
        image,
        categories,
    }
}

pub fn map_post(post: &RawPost) -> BlogPostViewModel {
    BlogPostViewModel { card: map_post_card(post), content_html: post.content.rendered.clone(), modified: post.modified.clone() }
}

pub fn map_blog_listing(page: Option<&RawPage>, category: Option<Category>, posts: &[RawPost]) -> BlogListingViewModel {
    let hero = page.and_then(|page| {
        let acf: BlogAcf = page.acf();
        acf.blog_content.iter().find_map(|block| match block {
            BlogBlock::HeroData(data) => Some(map_hero(data)),
            BlogBlock::Unknown => None,
        })
    });

    BlogListingViewModel { hero, category, posts: posts.iter().map(map_post_card).collect() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn page(acf: Value) -> RawPage {
        serde_json::from_value(json!({"id": 1, "slug": "page", "title": {"rendered": "Page"}, "acf": acf})).unwrap()
    }

    fn service_page() -> RawPage {
        page(json!({
            "services": [
                {"acf_fc_layout": "hero_data", "title": "Our Services", "image": false},
                {"acf_fc_layout": "service_data", "title": "App Development", "short_description": "Apps", "content": [
                    {"acf_fc_layout": "service_hero_data", "title": "Mobile apps", "subtitle": "iOS &amp; Android",
                     "image": {"url": "https://cms/hero.png", "alt": "Hero"}},
                    {"acf_fc_layout": "feature_data", "title": "Native", "points": [
                        {"title": "Swift", "description": "iOS"},
                        {"title": "", "description": "orphan body"},
                        {"title": "Kotlin", "description": "  "},
                        {"title": "Flutter", "description": "Cross-platform"}
                    ]},
                    {"acf_fc_layout": "description_data", "heading": "Process", "description_blocks": [
                        {"title": "Discover", "text": "Workshops"},
                        {"title": "Build", "text": "Sprints"}
                    ]},
                    {"acf_fc_layout": "technology_data", "name": "Rust", "logo": false},
                    {"acf_fc_layout": "description_data", "heading": "Support", "description_blocks": [
                        {"title": "Maintain", "text": "SLA"}
                    ]},
                    {"acf_fc_layout": "cta_data", "title": "Talk to us", "link": {"title": "Contact", "url": "/contact"}}
                ]},
                {"acf_fc_layout": "service_data", "title": "Web Development", "content": []}
            ]
        }))
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(plain_text("<p>Hello&nbsp;<b>world</b></p>\n"), "Hello world");
        assert_eq!(plain_text("Tom &amp; Jerry"), "Tom & Jerry");
        assert_eq!(plain_text("  spaced   out "), "spaced out");
    }

    #[test]
    fn test_map_service_full() {
        let (_, items) = service_blocks(&service_page());
        let view = map_service("app-development", &items[0]).unwrap();

        assert_eq!(view.slug, "app-development");
        assert_eq!(view.title, "App Development");
        assert_eq!(view.hero.title, "Mobile apps");
        assert_eq!(view.hero.subtitle, "iOS & Android");
        assert_eq!(view.hero.image.as_ref().map(|i| i.url.as_str()), Some("https://cms/hero.png"));
        assert_eq!(view.technologies, vec![Technology { name: "Rust".into(), logo: None }]);
        assert_eq!(view.cta.as_ref().and_then(|c| c.link.as_ref()).map(|l| l.url.as_str()), Some("/contact"));
    }

    #[test]
    fn test_feature_points_filtered() {
        let (_, items) = service_blocks(&service_page());
        let view = map_service("app-development", &items[0]).unwrap();

        let points = &view.features[0].points;
        assert_eq!(
            points,
            &vec![
                FeaturePoint { title: "Swift".into(), description: "iOS".into() },
                FeaturePoint { title: "Flutter".into(), description: "Cross-platform".into() },
            ]
        );
    }

    #[test]
    fn test_description_flattened_in_order() {
        let (_, items) = service_blocks(&service_page());
        let view = map_service("app-development", &items[0]).unwrap();

        let titles: Vec<_> = view.description.iter().map(|b| (b.section.as_str(), b.title.as_str())).collect();
        assert_eq!(titles, vec![("Process", "Discover"), ("Process", "Build"), ("Support", "Maintain")]);
    }

    #[test]
    fn test_service_without_hero_is_none() {
        let (_, items) = service_blocks(&service_page());
        assert!(map_service("web-development", &items[1]).is_none());
    }

    #[test]
    fn test_services_index_cards_link_by_slot() {
        let view = map_services_index(&service_page()).unwrap();
        assert_eq!(view.hero.title, "Our Services");
        assert_eq!(view.hero.image, None);
        let urls: Vec<_> = view.services.iter().filter_map(|c| c.link.as_ref()).map(|l| l.url.as_str()).collect();
        assert_eq!(urls, vec!["/services/app-development", "/services/web-development"]);
    }

    #[test]
    fn test_missing_arrays_default_to_empty() {
        let page = page(json!({"home_content": [{"acf_fc_layout": "hero_data", "title": "Welcome"}]}));
        let view = map_home(&page).unwrap();
        assert_eq!(view.hero.title, "Welcome");
        assert!(view.services.is_empty());
        assert!(view.testimonials.is_empty());
        assert!(view.clients.is_empty());

        let view = map_site_chrome(&page);
        assert_eq!(view, SiteChrome::default());
    }

    #[test]
    fn test_missing_hero_is_none_for_every_page_type() {
        let empty = page(json!(false));
        assert!(map_home(&empty).is_none());
        assert!(map_about(&empty).is_none());
        assert!(map_contact(&empty).is_none());
        assert!(map_services_index(&empty).is_none());
        assert!(map_applications_index(&empty).is_none());
    }

    #[test]
    fn test_home_items_keep_source_order() {
        let page = page(json!({"home_content": [
            {"acf_fc_layout": "service_card_data", "title": "One"},
            {"acf_fc_layout": "hero_data", "title": "Hero"},
            {"acf_fc_layout": "service_card_data", "title": "Two"},
            {"acf_fc_layout": "client_logo_data", "name": "NoLogo", "logo": false},
            {"acf_fc_layout": "service_card_data", "title": "Three"},
            {"acf_fc_layout": "stat_data", "value": 120, "label": "Projects"}
        ]}));
        let view = map_home(&page).unwrap();
        let titles: Vec<_> = view.services.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["One", "Two", "Three"]);
        assert_eq!(view.clients, vec![ClientLogo { name: "NoLogo".into(), logo: None }]);
        assert_eq!(view.stats[0].value, "120");
    }

    #[test]
    fn test_feature_points_kept_verbatim() {
        let feature: FeatureData = serde_json::from_value(json!({
            "title": "Stack",
            "points": [{"title": " Rust ", "description": "Fast\n"}, {"title": " ", "description": "x"}]
        }))
        .unwrap();
        let points = map_feature(&feature).points;
        assert_eq!(points, vec![FeaturePoint { title: " Rust ".into(), description: "Fast\n".into() }]);
    }

    #[test]
    fn test_item_blocks_map_one_to_one() {
        let home = map_home(&page(json!({"home_content": [
            {"acf_fc_layout": "hero_data", "title": "Hero"},
            {"acf_fc_layout": "testimonial_data", "quote": "", "author": "Ana"},
            {"acf_fc_layout": "testimonial_data", "quote": "Great"},
            {"acf_fc_layout": "client_logo_data", "name": "Acme", "logo": {"url": "https://cms/acme.png"}},
            {"acf_fc_layout": "client_logo_data", "name": "Bare", "logo": false},
            {"acf_fc_layout": "stat_data", "label": "Years"}
        ]})))
        .unwrap();
        assert_eq!(home.testimonials.len(), 2);
        assert_eq!(home.testimonials[0].quote, "");
        assert_eq!(home.clients.len(), 2);
        assert!(home.clients[0].logo.is_some());
        assert!(home.clients[1].logo.is_none());
        assert_eq!(home.stats.len(), 1);

        let about = map_about(&page(json!({"about_content": [
            {"acf_fc_layout": "hero_data", "title": "About"},
            {"acf_fc_layout": "member_data", "role": "Ghost"},
            {"acf_fc_layout": "value_data", "description": "No title"},
            {"acf_fc_layout": "story_data", "heading": ""}
        ]})))
        .unwrap();
        assert_eq!((about.members.len(), about.values.len(), about.story.len()), (1, 1, 1));

        let (_, services) = service_blocks(&page(json!({"services": [
            {"acf_fc_layout": "service_data", "title": "Svc", "content": [
                {"acf_fc_layout": "service_hero_data", "title": "Svc"},
                {"acf_fc_layout": "technology_data", "name": ""},
                {"acf_fc_layout": "technology_data", "name": "Go"},
                {"acf_fc_layout": "feature_data", "title": ""}
            ]}
        ]})));
        let service = map_service("svc", &services[0]).unwrap();
        assert_eq!(service.technologies.iter().map(|t| t.name.as_str()).collect::<Vec<_>>(), vec!["", "Go"]);
        assert_eq!(service.features.len(), 1);

        let (_, applications) = application_blocks(&page(json!({"applications": [
            {"acf_fc_layout": "application_data", "title": "App", "content": [
                {"acf_fc_layout": "application_hero_data", "title": "App"},
                {"acf_fc_layout": "benefit_data"},
                {"acf_fc_layout": "industry_data", "name": "Health"},
                {"acf_fc_layout": "industry_data"}
            ]}
        ]})));
        let application = map_application("app", &applications[0]).unwrap();
        assert_eq!(application.benefits.len(), 1);
        assert_eq!(application.industries, vec!["Health".to_string(), String::new()]);
    }

    #[test]
    fn test_mapping_is_idempotent() {
        let page = service_page();
        assert_eq!(map_services_index(&page), map_services_index(&page));
        let (_, items) = service_blocks(&page);
        assert_eq!(map_service("x", &items[0]), map_service("x", &items[0]));
    }

    #[test]
    fn test_map_application() {
        let page = page(json!({"applications": [
            {"acf_fc_layout": "application_data", "key": "crm-platform", "title": "CRM", "content": [
                {"acf_fc_layout": "application_hero_data", "title": "CRM Platform"},
                {"acf_fc_layout": "benefit_data", "title": "Faster sales", "description": "Pipeline"},
                {"acf_fc_layout": "benefit_data", "title": "", "description": "dropped"},
                {"acf_fc_layout": "screenshot_data", "caption": "Dashboard", "images": [
                    {"url": "https://cms/1.png"}, false, {"url": ""}, {"url": "https://cms/2.png"}
                ]},
                {"acf_fc_layout": "industry_data", "name": "Retail"},
                {"acf_fc_layout": "industry_data", "name": false}
            ]}
        ]}));
        let (_, items) = application_blocks(&page);
        let view = map_application("crm-platform", &items[0]).unwrap();

        assert_eq!(view.title, "CRM");
        assert_eq!(view.benefits.len(), 2);
        assert_eq!(view.benefits[1].title, "");
        assert_eq!(view.screenshots.len(), 2);
        assert!(view.screenshots.iter().all(|s| s.caption == "Dashboard"));
        assert_eq!(view.industries, vec!["Retail".to_string(), String::new()]);
    }

    #[test]
    fn test_map_contact_and_chrome() {
        let page = page(json!({"contact_content": [
            {"acf_fc_layout": "hero_data", "title": "Contact"},
            {"acf_fc_layout": "contact_details_data", "email": "hi@example.com", "phone": "+1 555", "map_url": ""},
            {"acf_fc_layout": "social_link_data", "platform": "LinkedIn", "url": "https://linkedin.com/company/x"},
            {"acf_fc_layout": "social_link_data", "platform": "X", "url": false}
        ]}));

        let view = map_contact(&page).unwrap();
        assert_eq!(view.details.email, "hi@example.com");
        assert_eq!(view.details.map_url, None);
        assert_eq!(view.social.len(), 1);
        assert_eq!(view.social[0].platform, "linkedin");

        let chrome = map_site_chrome(&page);
        assert_eq!(chrome.social, view.social);
        assert_eq!(chrome.contact, Some(view.details));
    }

    #[test]
    fn test_map_about_keeps_nameless_members() {
        let page = page(json!({"about_content": [
            {"acf_fc_layout": "hero_data", "title": "About"},
            {"acf_fc_layout": "member_data", "name": "Ada", "role": "CTO", "linkedin": ""},
            {"acf_fc_layout": "member_data", "name": "", "role": "Ghost"},
            {"acf_fc_layout": "value_data", "title": "Craft", "description": "Care"}
        ]}));
        let view = map_about(&page).unwrap();
        assert_eq!(view.members.len(), 2);
        assert_eq!(view.members[0].linkedin, None);
        assert_eq!(view.members[1].name, "");
        assert_eq!(view.members[1].role, "Ghost");
        assert_eq!(view.values[0].title, "Craft");
    }

    #[test]
    fn test_map_post_card_flattens_terms() {
        let post: RawPost = serde_json::from_value(json!({
            "id": 5,
            "slug": "launch",
            "date": "2024-05-01T10:00:00",
            "title": {"rendered": "We&#8217;re live"},
            "excerpt": {"rendered": "<p>Big news [&hellip;]</p>\n"},
            "_embedded": {
                "author": [{"name": "Jo"}],
                "wp:featuredmedia": [{"source_url": "", "alt_text": ""}, {"source_url": "https://cms/cover.jpg"}],
                "wp:term": [
                    [{"id": 2, "name": "News", "slug": "news", "taxonomy": "category"},
                     {"id": 4, "name": "Product", "slug": "product", "taxonomy": "category"}],
                    [{"id": 9, "name": "rust", "slug": "rust", "taxonomy": "post_tag"}]
                ]
            }
        }))
        .unwrap();

        let card = map_post_card(&post);
        assert_eq!(card.title, "We\u{2019}re live");
        assert_eq!(card.excerpt, "Big news [\u{2026}]");
        assert_eq!(card.author, "Jo");
        assert_eq!(card.image.map(|i| i.url), Some("https://cms/cover.jpg".to_string()));
        let slugs: Vec<_> = card.categories.iter().map(|c| c.slug.as_str()).collect();
        assert_eq!(slugs, vec!["news", "product"]);
    }

    #[test]
    fn test_blog_listing_without_page() {
        let view = map_blog_listing(None, None, &[RawPost::default(), RawPost::default()]);
        assert_eq!(view.hero, None);
        assert_eq!(view.posts.len(), 2);
    }

    #[test]
    fn test_info_page() {
        let page: RawPage = serde_json::from_value(json!({
            "slug": "privacy",
            "title": {"rendered": "Privacy Policy"},
            "content": {"rendered": "<p>We respect it.</p>"},
            "acf": {"last_updated": "2024-01-01"}
        }))
        .unwrap();
        let view = map_info_page(&page);
        assert_eq!(view.title, "Privacy Policy");
        assert_eq!(view.last_updated, "2024-01-01");
        assert_eq!(view.content_html, "<p>We respect it.</p>");
    }
}
