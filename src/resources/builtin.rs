//! Built-in Class 12 textbook table.

use std::collections::BTreeMap;

use super::model::{Book, Chapter, SubjectResources, WholeBook};
use crate::download::underscore_whitespace;

const NCERT_PDF_BASE: &str = "https://ncert.nic.in/textbook/pdf/";

/// Textbook published as numbered chapter PDFs plus a `<code>ps.pdf` bundle.
struct NcertBook {
    subject: &'static str,
    id: &'static str,
    title: &'static str,
    /// Short name used in chapter filenames.
    short_title: &'static str,
    whole_filename: &'static str,
    base_code: &'static str,
    chapters: u8,
}

/// Book available only as a single PDF.
struct StandaloneBook {
    subject: &'static str,
    id: &'static str,
    title: &'static str,
    url: &'static str,
    filename: &'static str,
}

const NCERT_BOOKS: &[NcertBook] = &[
    NcertBook {
        subject: "English",
        id: "english_flamingo",
        title: "Flamingo (Core)",
        short_title: "Flamingo",
        whole_filename: "English_Flamingo_Full.pdf",
        base_code: "lefl1",
        chapters: 14,
    },
    NcertBook {
        subject: "English",
        id: "english_vistas",
        title: "Vistas (Supplementary Reader)",
        short_title: "Vistas",
        whole_filename: "English_Vistas_Full.pdf",
        base_code: "levt1",
        chapters: 8,
    },
    NcertBook {
        subject: "Mathematics",
        id: "maths_part1",
        title: "Mathematics Part I",
        short_title: "Maths_Part_I",
        whole_filename: "Mathematics_Part_I_Full.pdf",
        base_code: "lemh1",
        chapters: 6,
    },
    NcertBook {
        subject: "Mathematics",
        id: "maths_part2",
        title: "Mathematics Part II",
        short_title: "Maths_Part_II",
        whole_filename: "Mathematics_Part_II_Full.pdf",
        base_code: "lemh2",
        chapters: 7,
    },
    NcertBook {
        subject: "Accountancy",
        id: "acc_part1",
        title: "Accountancy Part I",
        short_title: "Accountancy_Part_I",
        whole_filename: "Accountancy_Part_I_Full.pdf",
        base_code: "leac1",
        chapters: 5,
    },
    NcertBook {
        subject: "Accountancy",
        id: "acc_part2",
        title: "Accountancy Part II",
        short_title: "Accountancy_Part_II",
        whole_filename: "Accountancy_Part_II_Full.pdf",
        base_code: "leac2",
        chapters: 6,
    },
    NcertBook {
        subject: "Economics",
        id: "eco_ied",
        title: "Indian Economic Development",
        short_title: "Indian_Economic_Development",
        whole_filename: "Economics_Indian_Economic_Development_Full.pdf",
        base_code: "keec1",
        chapters: 8,
    },
    NcertBook {
        subject: "Economics",
        id: "eco_macro",
        title: "Introductory Macroeconomics",
        short_title: "Introductory_Macroeconomics",
        whole_filename: "Economics_Introductory_Macroeconomics_Full.pdf",
        base_code: "leec1",
        chapters: 6,
    },
    NcertBook {
        subject: "Business Studies",
        id: "bst_part1",
        title: "Business Studies Part I",
        short_title: "Business_Studies_Part_I",
        whole_filename: "Business_Studies_Part_I_Full.pdf",
        base_code: "lebs1",
        chapters: 8,
    },
    NcertBook {
        subject: "Business Studies",
        id: "bst_part2",
        title: "Business Studies Part II",
        short_title: "Business_Studies_Part_II",
        whole_filename: "Business_Studies_Part_II_Full.pdf",
        base_code: "lebs2",
        chapters: 4,
    },
];

const STANDALONE_BOOKS: &[StandaloneBook] = &[
    StandaloneBook {
        subject: "Data Science",
        id: "ds_microsoft_student_handbook",
        title: "Data Science (Microsoft / CBSE) Student Handbook",
        url: "https://cbseacademic.nic.in/web_material/codeingDS/classXII_DS_Student_Handbook.pdf",
        filename: "Data_Science_Microsoft_Student_Handbook.pdf",
    },
    StandaloneBook {
        subject: "Data Science",
        id: "ds_microsoft_teacher_handbook",
        title: "Data Science (Microsoft / CBSE) Teacher Handbook",
        url: "https://cbseacademic.nic.in/web_material/codeingDS/classXII_DS_Teacher_Handbook.pdf",
        filename: "Data_Science_Microsoft_Teacher_Handbook.pdf",
    },
    StandaloneBook {
        subject: "Data Science",
        id: "ds_google_drive_book",
        title: "Data Science (Provided PDF)",
        url: "https://drive.google.com/uc?export=download&id=1auNmPmWRHfhCYTtZ3nTk33YF99p1AFB9",
        filename: "Data_Science_Provided.pdf",
    },
    StandaloneBook {
        subject: "Data Science",
        id: "ds_employability_skills",
        title: "Employability Skills (Class XII)",
        url: "https://cbseacademic.nic.in/web_material/Curriculum21/publication/srsec/Employability_Skills_XII.pdf",
        filename: "Employability_Skills_Class_XII.pdf",
    },
];

impl NcertBook {
    fn to_book(&self) -> Book {
        let chapters = (1..=self.chapters)
            .map(|n| Chapter {
                id: format!("{}_ch{n:02}", self.id),
                title: format!("Chapter {n}"),
                url: format!("{NCERT_PDF_BASE}{}{n:02}.pdf", self.base_code),
                filename: Some(format!(
                    "{}_{}_Chapter_{n:02}.pdf",
                    self.subject,
                    underscore_whitespace(self.short_title)
                )),
            })
            .collect();
        Book {
            id: self.id.to_string(),
            title: self.title.to_string(),
            whole: Some(WholeBook {
                id: format!("{}_whole", self.id),
                url: format!("{NCERT_PDF_BASE}{}ps.pdf", self.base_code),
                filename: Some(self.whole_filename.to_string()),
            }),
            chapters,
        }
    }
}

impl StandaloneBook {
    fn to_book(&self) -> Book {
        Book {
            id: self.id.to_string(),
            title: self.title.to_string(),
            whole: Some(WholeBook {
                id: format!("{}_whole", self.id),
                url: self.url.to_string(),
                filename: Some(self.filename.to_string()),
            }),
            chapters: Vec::new(),
        }
    }
}

/// Builds the built-in subject map.
pub(crate) fn builtin_subjects() -> BTreeMap<String, SubjectResources> {
    let mut subjects: BTreeMap<String, SubjectResources> = BTreeMap::new();
    let books = NCERT_BOOKS
        .iter()
        .map(|b| (b.subject, b.to_book()))
        .chain(STANDALONE_BOOKS.iter().map(|b| (b.subject, b.to_book())));
    for (subject, book) in books {
        subjects
            .entry(subject.to_string())
            .or_insert_with(|| SubjectResources {
                subject: subject.to_string(),
                books: Vec::new(),
            })
            .books
            .push(book);
    }
    subjects
}
