//! Flexible-content block schemas, one enum per ACF flexible field.
//!
//! Each enum is tagged by `acf_fc_layout`; layouts we do not know about land
//! in the `Unknown` variant and are ignored by the mapper.

use serde::Deserialize;

use super::de::{Repeater, lenient, text};

/// ACF image field (return format "array").
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct AcfImage {
    #[serde(deserialize_with = "text")]
    pub url: String,
    #[serde(deserialize_with = "text")]
    pub alt: String,
    #[serde(deserialize_with = "lenient")]
    pub width: Option<u32>,
    #[serde(deserialize_with = "lenient")]
    pub height: Option<u32>,
}

/// ACF link field (return format "array").
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct AcfLink {
    #[serde(deserialize_with = "text")]
    pub title: String,
    #[serde(deserialize_with = "text")]
    pub url: String,
    #[serde(deserialize_with = "text")]
    pub target: String,
}

/// Page-level header shared by every flexible field.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct HeroData {
    #[serde(deserialize_with = "text")]
    pub title: String,
    #[serde(deserialize_with = "text")]
    pub subtitle: String,
    #[serde(deserialize_with = "text")]
    pub description: String,
    #[serde(deserialize_with = "lenient")]
    pub image: Option<AcfImage>,
    #[serde(deserialize_with = "lenient")]
    pub cta: Option<AcfLink>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct CardData {
    #[serde(deserialize_with = "text")]
    pub title: String,
    #[serde(deserialize_with = "text")]
    pub description: String,
    #[serde(deserialize_with = "lenient")]
    pub image: Option<AcfImage>,
    #[serde(deserialize_with = "lenient")]
    pub link: Option<AcfLink>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct TestimonialData {
    #[serde(deserialize_with = "text")]
    pub quote: String,
    #[serde(deserialize_with = "text")]
    pub author: String,
    #[serde(deserialize_with = "text")]
    pub company: String,
    #[serde(deserialize_with = "lenient")]
    pub avatar: Option<AcfImage>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClientLogoData {
    #[serde(deserialize_with = "text")]
    pub name: String,
    #[serde(deserialize_with = "lenient")]
    pub logo: Option<AcfImage>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct StatData {
    #[serde(deserialize_with = "text")]
    pub value: String,
    #[serde(deserialize_with = "text")]
    pub label: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "acf_fc_layout", rename_all = "snake_case")]
pub enum HomeBlock {
    HeroData(HeroData),
    ServiceCardData(CardData),
    ApplicationCardData(CardData),
    TestimonialData(TestimonialData),
    ClientLogoData(ClientLogoData),
    StatData(StatData),
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct HomeAcf {
    pub home_content: Repeater<HomeBlock>,
}

/// A sub-point of a feature; incomplete points are dropped by the mapper.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct PointData {
    #[serde(deserialize_with = "text")]
    pub title: String,
    #[serde(deserialize_with = "text")]
    pub description: String,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct FeatureData {
    #[serde(deserialize_with = "text")]
    pub title: String,
    #[serde(deserialize_with = "text")]
    pub description: String,
    #[serde(deserialize_with = "lenient")]
    pub icon: Option<AcfImage>,
    pub points: Repeater<PointData>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct DescriptionBlockData {
    #[serde(deserialize_with = "text")]
    pub title: String,
    #[serde(deserialize_with = "text")]
    pub text: String,
}

/// A description section: a heading over a nested repeater of blocks.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct DescriptionData {
    #[serde(deserialize_with = "text")]
    pub heading: String,
    pub description_blocks: Repeater<DescriptionBlockData>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct TechnologyData {
    #[serde(deserialize_with = "text")]
    pub name: String,
    #[serde(deserialize_with = "lenient")]
    pub logo: Option<AcfImage>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct CtaData {
    #[serde(deserialize_with = "text")]
    pub title: String,
    #[serde(deserialize_with = "text")]
    pub description: String,
    #[serde(deserialize_with = "lenient")]
    pub link: Option<AcfLink>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "acf_fc_layout", rename_all = "snake_case")]
pub enum ServiceContentBlock {
    ServiceHeroData(HeroData),
    FeatureData(FeatureData),
    DescriptionData(DescriptionData),
    TechnologyData(TechnologyData),
    CtaData(CtaData),
    #[serde(other)]
    Unknown,
}

/// One service entry on the services page.
///
/// `key` is an optional machine-readable identifier; when editors fill it in
/// it takes precedence over the positional slot table.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServiceBlock {
    #[serde(deserialize_with = "text")]
    pub key: String,
    #[serde(deserialize_with = "text")]
    pub title: String,
    #[serde(deserialize_with = "text")]
    pub short_description: String,
    #[serde(deserialize_with = "lenient")]
    pub icon: Option<AcfImage>,
    pub content: Repeater<ServiceContentBlock>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "acf_fc_layout", rename_all = "snake_case")]
pub enum ServicesBlock {
    HeroData(HeroData),
    ServiceData(ServiceBlock),
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServicesAcf {
    pub services: Repeater<ServicesBlock>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct BenefitData {
    #[serde(deserialize_with = "text")]
    pub title: String,
    #[serde(deserialize_with = "text")]
    pub description: String,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScreenshotData {
    #[serde(deserialize_with = "text")]
    pub caption: String,
    pub images: Repeater<AcfImage>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct IndustryData {
    #[serde(deserialize_with = "text")]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "acf_fc_layout", rename_all = "snake_case")]
pub enum ApplicationContentBlock {
    ApplicationHeroData(HeroData),
    FeatureData(FeatureData),
    BenefitData(BenefitData),
    ScreenshotData(ScreenshotData),
    IndustryData(IndustryData),
    CtaData(CtaData),
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct ApplicationBlock {
    #[serde(deserialize_with = "text")]
    pub key: String,
    #[serde(deserialize_with = "text")]
    pub title: String,
    #[serde(deserialize_with = "text")]
    pub short_description: String,
    #[serde(deserialize_with = "lenient")]
    pub icon: Option<AcfImage>,
    pub content: Repeater<ApplicationContentBlock>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "acf_fc_layout", rename_all = "snake_case")]
pub enum ApplicationsBlock {
    HeroData(HeroData),
    ApplicationData(ApplicationBlock),
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct ApplicationsAcf {
    pub applications: Repeater<ApplicationsBlock>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct StoryData {
    #[serde(deserialize_with = "text")]
    pub heading: String,
    #[serde(deserialize_with = "text")]
    pub text: String,
    #[serde(deserialize_with = "lenient")]
    pub image: Option<AcfImage>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct MemberData {
    #[serde(deserialize_with = "text")]
    pub name: String,
    #[serde(deserialize_with = "text")]
    pub role: String,
    #[serde(deserialize_with = "text")]
    pub bio: String,
    #[serde(deserialize_with = "lenient")]
    pub photo: Option<AcfImage>,
    #[serde(deserialize_with = "text")]
    pub linkedin: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "acf_fc_layout", rename_all = "snake_case")]
pub enum AboutBlock {
    HeroData(HeroData),
    StoryData(StoryData),
    MemberData(MemberData),
    ValueData(BenefitData),
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct AboutAcf {
    pub about_content: Repeater<AboutBlock>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct ContactDetailsData {
    #[serde(deserialize_with = "text")]
    pub email: String,
    #[serde(deserialize_with = "text")]
    pub phone: String,
    #[serde(deserialize_with = "text")]
    pub address: String,
    #[serde(deserialize_with = "text")]
    pub hours: String,
    #[serde(deserialize_with = "text")]
    pub map_url: String,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct SocialLinkData {
    #[serde(deserialize_with = "text")]
    pub platform: String,
    #[serde(deserialize_with = "text")]
    pub url: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "acf_fc_layout", rename_all = "snake_case")]
pub enum ContactBlock {
    HeroData(HeroData),
    ContactDetailsData(ContactDetailsData),
    SocialLinkData(SocialLinkData),
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct ContactAcf {
    pub contact_content: Repeater<ContactBlock>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "acf_fc_layout", rename_all = "snake_case")]
pub enum BlogBlock {
    HeroData(HeroData),
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct BlogAcf {
    pub blog_content: Repeater<BlogBlock>,
}

/// Fields of the privacy (and other plain) pages.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct InfoAcf {
    #[serde(deserialize_with = "text")]
    pub last_updated: String,
}
