use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::listing::source::{Listable, MemorySource};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: u32,
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub author: String,
    pub category: String,
    pub published_on: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnquiryStatus {
    Open,
    Matched,
    Closed,
}

impl EnquiryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnquiryStatus::Open => "open",
            EnquiryStatus::Matched => "matched",
            EnquiryStatus::Closed => "closed",
        }
    }
}

/// A student request for a tutor, shown on the enquiry dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enquiry {
    pub id: u32,
    pub student: String,
    pub subject: String,
    pub grade: String,
    pub city: String,
    pub mode: String,
    pub status: EnquiryStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Faq {
    pub id: u32,
    pub category: String,
    pub question: String,
    pub answer: String,
}

impl Listable for BlogPost {
    fn search_text(&self) -> String {
        format!("{} {} {}", self.title, self.excerpt, self.author)
    }

    fn field(&self, key: &str) -> Option<String> {
        match key {
            "category" => Some(self.category.clone()),
            "author" => Some(self.author.clone()),
            _ => None,
        }
    }
}

impl Listable for Enquiry {
    fn search_text(&self) -> String {
        format!("{} {} {}", self.student, self.subject, self.city)
    }

    fn field(&self, key: &str) -> Option<String> {
        match key {
            "subject" => Some(self.subject.clone()),
            "city" => Some(self.city.clone()),
            "mode" => Some(self.mode.clone()),
            "grade" => Some(self.grade.clone()),
            "status" => Some(self.status.as_str().to_string()),
            _ => None,
        }
    }
}

impl Listable for Faq {
    fn search_text(&self) -> String {
        format!("{} {}", self.question, self.answer)
    }

    fn field(&self, key: &str) -> Option<String> {
        match key {
            "category" => Some(self.category.clone()),
            _ => None,
        }
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

pub fn blog_posts() -> Vec<BlogPost> {
    let rows = [
        ("board-exam-revision-plan", "A 30 day board exam revision plan", "Split the syllabus into weekly sprints and keep Sundays for mock papers.", "Neha Kapoor", "exams", (2024, 1, 8)),
        ("finding-the-right-maths-tutor", "Finding the right maths tutor", "Questions to ask before the first demo class.", "Arjun Rao", "tutoring", (2024, 1, 22)),
        ("online-vs-home-tuition", "Online vs home tuition", "What changes for the student, and what does not.", "Neha Kapoor", "tutoring", (2024, 2, 5)),
        ("jee-physics-mistakes", "Five JEE physics mistakes", "Units, free body diagrams and the traps in rotational motion.", "Vikram Iyer", "exams", (2024, 2, 19)),
        ("spoken-english-at-home", "Practising spoken English at home", "Short daily routines that build fluency.", "Sara Thomas", "languages", (2024, 3, 4)),
        ("becoming-a-tutor", "Becoming a tutor on MentorClap", "Profile tips that get more enquiries.", "Arjun Rao", "tutors", (2024, 3, 18)),
        ("neet-biology-notes", "Making NEET biology notes that stick", "Diagrams first, text second.", "Priya Menon", "exams", (2024, 4, 1)),
        ("coding-for-kids", "Coding for kids: where to start", "Block based tools before syntax.", "Sara Thomas", "skills", (2024, 4, 15)),
        ("setting-tuition-fees", "Setting your tuition fees", "How experience, subject and city shape a fair rate.", "Vikram Iyer", "tutors", (2024, 5, 6)),
        ("algebra-confidence", "Building confidence in algebra", "Why word problems feel hard and how to fix it.", "Priya Menon", "tutoring", (2024, 5, 20)),
        ("exam-day-anxiety", "Handling exam day anxiety", "Sleep, breakfast and a checklist for the night before.", "Neha Kapoor", "exams", (2024, 6, 3)),
        ("learning-french-online", "Learning French online", "Pairing a tutor with self study apps.", "Sara Thomas", "languages", (2024, 6, 17)),
    ];

    rows.iter()
        .zip(1u32..)
        .map(|((slug, title, excerpt, author, category, (y, m, d)), id)| BlogPost {
            id,
            slug: slug.to_string(),
            title: title.to_string(),
            excerpt: excerpt.to_string(),
            author: author.to_string(),
            category: category.to_string(),
            published_on: date(*y, *m, *d),
        })
        .collect()
}

pub fn enquiries() -> Vec<Enquiry> {
    use EnquiryStatus::{Closed, Matched, Open};

    let rows = [
        ("Aarav", "Mathematics", "10", "Bangalore", "home", Open),
        ("Diya", "Physics", "12", "Pune", "online", Matched),
        ("Kabir", "Chemistry", "11", "Bangalore", "online", Open),
        ("Ishaan", "Mathematics", "8", "Delhi", "home", Closed),
        ("Ananya", "English", "6", "Mumbai", "online", Open),
        ("Vihaan", "Biology", "12", "Pune", "home", Open),
        ("Saanvi", "Mathematics", "12", "Bangalore", "online", Matched),
        ("Reyansh", "Computer Science", "9", "Hyderabad", "online", Open),
        ("Myra", "French", "7", "Mumbai", "online", Open),
        ("Arjun", "Physics", "11", "Bangalore", "home", Open),
        ("Aadhya", "Mathematics", "5", "Chennai", "home", Closed),
        ("Vivaan", "Accountancy", "12", "Delhi", "online", Open),
        ("Kiara", "Chemistry", "12", "Pune", "online", Matched),
        ("Rohan", "Mathematics", "9", "Bangalore", "home", Open),
    ];

    rows.iter()
        .zip(1u32..)
        .map(|((student, subject, grade, city, mode, status), id)| Enquiry {
            id,
            student: student.to_string(),
            subject: subject.to_string(),
            grade: grade.to_string(),
            city: city.to_string(),
            mode: mode.to_string(),
            status: *status,
        })
        .collect()
}

pub fn faqs() -> Vec<Faq> {
    let rows = [
        ("students", "How do I post an enquiry?", "Sign in, open the dashboard and describe the subject, grade and preferred mode."),
        ("students", "Is the demo class free?", "Most tutors offer a free first session, it is shown on their profile."),
        ("students", "Can I change my tutor?", "Yes, close the enquiry and post a new one at any time."),
        ("tutors", "How do I get enquiries?", "Complete your profile and pick the subjects and cities you teach."),
        ("tutors", "What are coins?", "Coins unlock student contact details on an enquiry."),
        ("tutors", "Do coins expire?", "Coins stay in your wallet until they are used."),
        ("payments", "Which payment methods are supported?", "Cards, UPI and net banking."),
        ("payments", "Can I get a refund on coins?", "Unused coins can be refunded within 7 days of purchase."),
    ];

    rows.iter()
        .zip(1u32..)
        .map(|((category, question, answer), id)| Faq {
            id,
            category: category.to_string(),
            question: question.to_string(),
            answer: answer.to_string(),
        })
        .collect()
}

/// The listings served by the list api
#[derive(Clone)]
pub struct Catalog {
    pub blogs: Arc<MemorySource<BlogPost>>,
    pub enquiries: Arc<MemorySource<Enquiry>>,
    pub faqs: Arc<MemorySource<Faq>>,
}

impl Catalog {
    /// mock collections the frontend pages were built against
    pub fn mock(page_size: usize) -> Self {
        Self {
            blogs: Arc::new(MemorySource::new(blog_posts(), page_size)),
            enquiries: Arc::new(MemorySource::new(enquiries(), page_size)),
            faqs: Arc::new(MemorySource::new(faqs(), page_size)),
        }
    }
}
