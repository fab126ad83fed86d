// SPDX-License-Identifier: MIT OR Apache-2.0

//! Answers derived from a parsed CV
//!
//! A CV extractor produces one [`CvData`] document. [`cv_to_answers`] expands
//! it into the labels application forms commonly use for each value, so a
//! single CV import can fill "Email", "Email Address" and "email" alike.
//! Feed the result to [`AnswerStore::import`](crate::store::AnswerStore::import);
//! labels repeated across entries collapse there as duplicates.
//!
//! Empty values produce no answers.

use serde::Deserialize;

use crate::store::NewAnswer;

const PERSONAL: &str = "Personal Information";
const WORK: &str = "Work Experience";
const EDUCATION: &str = "Education";
const SKILLS: &str = "Skills";
const LANGUAGES: &str = "Languages";
const CERTIFICATIONS: &str = "Certifications";

const TEXT_INPUT: &str = "TextInput";
const TEXTAREA: &str = "Textarea";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CvData {
    pub personal_info: PersonalInfo,
    pub summary: Option<String>,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub skills: Vec<String>,
    pub languages: Vec<Language>,
    pub certifications: Vec<Certification>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    pub full_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub country: Option<String>,
    #[serde(rename = "linkedIn")]
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub website: Option<String>,
}

impl PersonalInfo {
    /// Each value with the labels it answers.
    fn labelled(&self) -> [(Option<&str>, &'static [&'static str]); 13] {
        [
            (self.first_name.as_deref(), &["First Name", "first name", "firstName"]),
            (self.last_name.as_deref(), &["Last Name", "last name", "lastName"]),
            (self.full_name.as_deref(), &["Full Name", "full name", "Name", "name"]),
            (
                self.email.as_deref(),
                &["Email", "email", "Email Address", "email address"],
            ),
            (
                self.phone.as_deref(),
                &["Phone", "phone", "Phone Number", "phone number", "Mobile", "mobile"],
            ),
            (self.address.as_deref(), &["Address", "address", "Street Address"]),
            (self.city.as_deref(), &["City", "city"]),
            (self.state.as_deref(), &["State", "state", "Province"]),
            (
                self.zip_code.as_deref(),
                &["Zip Code", "zip code", "Postal Code", "postal code", "zipCode"],
            ),
            (self.country.as_deref(), &["Country", "country"]),
            (
                self.linkedin.as_deref(),
                &["LinkedIn", "linkedin", "LinkedIn URL", "LinkedIn Profile"],
            ),
            (self.github.as_deref(), &["GitHub", "github", "GitHub URL"]),
            (
                self.website.as_deref(),
                &["Website", "website", "Portfolio", "Personal Website"],
            ),
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Experience {
    pub company: Option<String>,
    pub title: Option<String>,
    pub location: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub current: Option<bool>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Education {
    pub institution: Option<String>,
    pub degree: Option<String>,
    pub field: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub gpa: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Language {
    pub language: String,
    pub proficiency: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Certification {
    pub name: String,
    pub issuer: Option<String>,
    pub date: Option<String>,
}

const SUMMARY_LABELS: &[&str] = &[
    "Summary",
    "summary",
    "About",
    "about",
    "Professional Summary",
    "About Me",
    "Bio",
    "Overview",
];

/// One value of a repeated CV entry.
struct EntryField<'a> {
    value: Option<&'a str>,
    field_type: &'static str,
    /// Labels carrying the entry prefix.
    numbered: &'static [&'static str],
    /// Extra bare labels for the first entry.
    first: &'static [&'static str],
}

impl<'a> EntryField<'a> {
    fn text(
        value: &'a Option<String>,
        numbered: &'static [&'static str],
        first: &'static [&'static str],
    ) -> Self {
        Self {
            value: value.as_deref(),
            field_type: TEXT_INPUT,
            numbered,
            first,
        }
    }
}

impl Experience {
    fn fields(&self) -> [EntryField<'_>; 6] {
        [
            EntryField::text(
                &self.company,
                &["Company", "Company Name", "Employer"],
                &[
                    "Company",
                    "Company Name",
                    "Current Company",
                    "Most Recent Company",
                    "Employer",
                ],
            ),
            EntryField::text(
                &self.title,
                &["Job Title", "Title", "Position", "Role"],
                &[
                    "Job Title",
                    "Title",
                    "Position",
                    "Current Title",
                    "Current Position",
                    "Role",
                ],
            ),
            EntryField::text(&self.location, &["Location"], &["Location"]),
            EntryField::text(&self.start_date, &["Start Date"], &["Start Date"]),
            EntryField::text(&self.end_date, &["End Date"], &["End Date"]),
            EntryField {
                value: self.description.as_deref(),
                field_type: TEXTAREA,
                numbered: &["Description", "Responsibilities"],
                first: &["Description", "Job Description", "Responsibilities"],
            },
        ]
    }
}

impl Education {
    fn fields(&self) -> [EntryField<'_>; 6] {
        [
            EntryField::text(
                &self.institution,
                &["School", "University", "Institution", "College"],
                &["School", "University", "Institution", "College", "School Name"],
            ),
            EntryField::text(
                &self.degree,
                &["Degree", "Degree Type"],
                &["Degree", "Degree Type", "Highest Degree"],
            ),
            EntryField::text(
                &self.field,
                &["Field of Study", "Major", "Discipline"],
                &["Field of Study", "Major", "Discipline", "Area of Study"],
            ),
            EntryField::text(&self.start_date, &["Start Date"], &[]),
            EntryField::text(
                &self.end_date,
                &["End Date", "Graduation Date"],
                &["Graduation Date", "Graduation Year"],
            ),
            EntryField::text(&self.gpa, &["GPA"], &["GPA", "Grade Point Average"]),
        ]
    }
}

/// Collects answers, dropping empty values.
#[derive(Default)]
struct Answers(Vec<NewAnswer>);

impl Answers {
    fn push(&mut self, section: &str, field_type: &str, field_name: String, value: &str) {
        self.0
            .push(NewAnswer::new(section, field_type, field_name, value));
    }

    fn labels<'l>(
        &mut self,
        section: &str,
        field_type: &str,
        labels: impl IntoIterator<Item = &'l str>,
        value: Option<&str>,
    ) {
        let Some(value) = value.filter(|v| !v.is_empty()) else {
            return;
        };
        for label in labels {
            self.push(section, field_type, label.to_string(), value);
        }
    }

    /// Entries are numbered "1 - ", "2 - "... unless there is only one.
    fn entries<'e, I>(&mut self, section: &str, entries: I)
    where
        I: ExactSizeIterator<Item = [EntryField<'e>; 6]>,
    {
        let single = entries.len() == 1;
        for (index, fields) in entries.enumerate() {
            let prefix = if single {
                String::new()
            } else {
                format!("{} - ", index + 1)
            };
            for field in fields {
                let Some(value) = field.value.filter(|v| !v.is_empty()) else {
                    continue;
                };
                for label in field.numbered {
                    self.push(section, field.field_type, format!("{prefix}{label}"), value);
                }
                if index == 0 {
                    for label in field.first {
                        self.push(section, field.field_type, label.to_string(), value);
                    }
                }
            }
        }
    }
}

/// Expand a CV into answers for the labels forms commonly use.
pub fn cv_to_answers(cv: &CvData) -> Vec<NewAnswer> {
    let mut answers = Answers::default();

    for (value, labels) in cv.personal_info.labelled() {
        answers.labels(PERSONAL, TEXT_INPUT, labels.iter().copied(), value);
    }
    answers.labels(
        PERSONAL,
        TEXTAREA,
        SUMMARY_LABELS.iter().copied(),
        cv.summary.as_deref(),
    );

    answers.entries(WORK, cv.experience.iter().map(Experience::fields));
    answers.entries(EDUCATION, cv.education.iter().map(Education::fields));

    if !cv.skills.is_empty() {
        let text = cv.skills.join(", ");
        answers.labels(
            SKILLS,
            TEXTAREA,
            ["Skills", "skills", "Technical Skills", "Key Skills"],
            Some(&text),
        );
        answers.labels(SKILLS, TEXT_INPUT, ["Skills"], Some(&text));
    }

    if !cv.languages.is_empty() {
        let text = joined(
            cv.languages
                .iter()
                .map(|l| with_detail(&l.language, l.proficiency.as_deref())),
        );
        answers.labels(LANGUAGES, TEXTAREA, ["Languages"], Some(&text));
        answers.labels(
            LANGUAGES,
            TEXT_INPUT,
            ["Languages", "Languages Spoken"],
            Some(&text),
        );
        for (index, entry) in cv.languages.iter().enumerate() {
            if entry.language.is_empty() {
                continue;
            }
            let number = index + 1;
            answers.push(
                LANGUAGES,
                TEXT_INPUT,
                format!("Language {number}"),
                &entry.language,
            );
            if let Some(proficiency) = entry.proficiency.as_deref().filter(|p| !p.is_empty()) {
                answers.push(
                    LANGUAGES,
                    TEXT_INPUT,
                    format!("Language {number} Proficiency"),
                    proficiency,
                );
            }
        }
    }

    if !cv.certifications.is_empty() {
        let text = joined(
            cv.certifications
                .iter()
                .map(|c| with_detail(&c.name, c.issuer.as_deref())),
        );
        answers.labels(CERTIFICATIONS, TEXTAREA, ["Certifications"], Some(&text));
        answers.labels(
            CERTIFICATIONS,
            TEXT_INPUT,
            ["Certifications", "Licenses and Certifications"],
            Some(&text),
        );
    }

    answers.0
}

/// "name (detail)", or just "name" without a detail.
fn with_detail(name: &str, detail: Option<&str>) -> String {
    match detail.filter(|d| !d.is_empty()) {
        Some(detail) => format!("{name} ({detail})"),
        None => name.to_string(),
    }
}

fn joined(items: impl Iterator<Item = String>) -> String {
    items.collect::<Vec<_>>().join(", ")
}

/// Decode a CV document: either the extractor's `{extractedData: ...}`
/// wrapper or the extracted data itself.
pub fn parse_cv(value: serde_json::Value) -> Result<CvData, serde_json::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Document {
        Wrapped {
            #[serde(rename = "extractedData")]
            extracted_data: CvData,
        },
        Plain(CvData),
    }

    Ok(match serde_json::from_value::<Document>(value)? {
        Document::Wrapped { extracted_data } | Document::Plain(extracted_data) => extracted_data,
    })
}
