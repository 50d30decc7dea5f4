//! Campus assistant
//!
//! Canned answers chosen by substring matching. Keyword groups are tried in
//! order first, then the topic names themselves, then a fallback.

use crate::domain::entities::{Role, User};

/// What a message is asking about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    Hello,
    Hi,
    Help,
    Attendance,
    LostFound,
    Upload,
    Complaint,
    Communication,
    Notes,
    Teacher,
    Student,
    Features,
    Commands,
    Admin,
    Profile,
    Thanks,
    Goodbye,
}

/// Keyword groups, checked in order. The first group with a hit wins.
const KEYWORD_GROUPS: &[(Topic, &[&str])] = &[
    (
        Topic::Attendance,
        &["present", "absent", "mark attendance", "attendance today"],
    ),
    (Topic::Upload, &["upload", "file", "image", "photo", "picture"]),
    (Topic::LostFound, &["lost", "found", "item", "missing", "recover"]),
    (
        Topic::Complaint,
        &["complain", "issue", "problem", "report", "delete complaint"],
    ),
    (
        Topic::Communication,
        &["message", "chat", "talk", "communicate", "announce"],
    ),
    (
        Topic::Notes,
        &[
            "study",
            "material",
            "note",
            "file",
            "upload",
            "attachment",
            "share notes",
        ],
    ),
    (
        Topic::Teacher,
        &["faculty", "professor", "teacher", "instructor", "lecturer"],
    ),
    (
        Topic::Student,
        &["pupil", "learner", "student", "roll number", "add student"],
    ),
    (
        Topic::Features,
        &["feature", "function", "capability", "what can"],
    ),
    (Topic::Commands, &["command", "quick", "shortcut", "how to"]),
    (Topic::Admin, &["admin", "privilege", "control", "manage"]),
    (
        Topic::Profile,
        &["profile", "my info", "who am i", "my account"],
    ),
    (Topic::Thanks, &["thank", "thanks", "appreciate"]),
    (Topic::Goodbye, &["bye", "goodbye", "see you", "exit"]),
];

/// Topic names matched literally when no keyword group hits
const TOPIC_NAMES: &[(&str, Topic)] = &[
    ("hello", Topic::Hello),
    ("hi", Topic::Hi),
    ("help", Topic::Help),
    ("attendance", Topic::Attendance),
    ("lost found", Topic::LostFound),
    ("upload", Topic::Upload),
    ("complaint", Topic::Complaint),
    ("communication", Topic::Communication),
    ("notes", Topic::Notes),
    ("teacher", Topic::Teacher),
    ("student", Topic::Student),
    ("features", Topic::Features),
    ("commands", Topic::Commands),
    ("admin", Topic::Admin),
    ("profile", Topic::Profile),
];

/// Pick the topic of a message, if any
pub fn classify(message: &str) -> Option<Topic> {
    let message = message.trim().to_lowercase();

    KEYWORD_GROUPS
        .iter()
        .find(|(_, words)| words.iter().any(|w| message.contains(w)))
        .map(|(topic, _)| *topic)
        .or_else(|| {
            TOPIC_NAMES
                .iter()
                .find(|(name, _)| message.contains(name))
                .map(|(_, topic)| *topic)
        })
}

/// Answer a chat message on behalf of `user`
pub fn respond(user: &User, message: &str) -> String {
    if message.trim().is_empty() {
        return "Please enter a message.".to_string();
    }

    match classify(message) {
        Some(topic) => answer(topic, user),
        None => fallback(user),
    }
}

fn answer(topic: Topic, user: &User) -> String {
    match topic {
        Topic::Hello => format!(
            "Hello {}! How can I help you around campus today?",
            user.name
        ),
        Topic::Hi => format!("Hi {}! What would you like to know?", user.name),
        Topic::Help => HELP.to_string(),
        Topic::Attendance => ATTENDANCE.to_string(),
        Topic::LostFound => LOST_FOUND.to_string(),
        Topic::Upload => UPLOAD.to_string(),
        Topic::Complaint => COMPLAINT.to_string(),
        Topic::Communication => COMMUNICATION.to_string(),
        Topic::Notes => NOTES.to_string(),
        Topic::Teacher => TEACHER.to_string(),
        Topic::Student => STUDENT.to_string(),
        Topic::Features => FEATURES.to_string(),
        Topic::Commands => COMMANDS.to_string(),
        Topic::Admin => admin(user),
        Topic::Profile => profile(user),
        Topic::Thanks => format!(
            "You're welcome, {}! Anything else I can help with?",
            user.name
        ),
        Topic::Goodbye => format!("Goodbye {}! Enjoy the rest of your day.", user.name),
    }
}

fn admin(user: &User) -> String {
    format!(
        r#"## Admin access - {}

Admins can:
- add, edit and delete students on the roster
- maintain the teacher directory
- mark attendance for any date
- resolve, reopen and delete complaints, and see who filed them
- delete any message, note or lost & found post"#,
        user.name
    )
}

fn profile(user: &User) -> String {
    let mut lines = vec![
        format!("## Your profile - {}", user.name),
        String::new(),
        format!("**Role:** {}", user.role.title()),
        format!(
            "**Branch:** {}",
            user.branch.as_deref().unwrap_or("Not specified")
        ),
    ];
    if let (Role::Student, Some(year)) = (user.role, user.year) {
        lines.push(format!("**Year:** {}", year));
    }
    lines.push(format!("**Phone:** {}", user.phone));
    lines.push(String::new());
    lines.push("**You can:**".to_string());

    if user.is_admin() {
        lines.push("- administer everything".to_string());
    }
    if user.can_mark_attendance() {
        lines.push("- mark attendance".to_string());
    } else {
        lines.push("- view attendance".to_string());
    }
    lines.push("- post and share notes".to_string());
    lines.push("- use the message board".to_string());
    lines.push("- post lost & found items with images".to_string());
    lines.push("- submit and delete your complaints".to_string());

    lines.join("\n")
}

fn fallback(user: &User) -> String {
    format!(
        r#"I'm not sure I understand, {}.

You can ask me about:
- attendance
- lost & found
- complaints
- the message board
- notes
- the teacher directory

Or type `help` for everything I know."#,
        user.name
    )
}

const HELP: &str = r#"# Campus assistant

## Attendance
- Teachers and admins mark students present or absent per day
- Everyone can browse attendance by date
- Admins maintain the student roster

## Lost & Found
- Report lost or found items with up to 3 photos
- Mark your post resolved once the item is back

## Complaints
- Complaints are anonymous to other users
- Admins resolve or reopen them

## Messages
- Post to the whole campus, with an optional attachment

## Notes
- Share study material publicly or keep it private

## Teachers
- Look up faculty contact details

Try: "how to mark attendance", "post a lost item", "share notes", "contact teachers""#;

const ATTENDANCE: &str = r#"## Attendance

Teachers and admins:
- mark a student present or absent for any date
- re-marking the same date replaces the earlier entry

Everyone:
- browse attendance by date
- see a student's history and attendance percentage"#;

const LOST_FOUND: &str = r#"## Lost & Found

- Say whether the item was lost or found
- Add where and when it happened, plus how to reach you
- Attach up to 3 images, 5MB each
- Mark the post resolved when the item is returned"#;

const UPLOAD: &str = r#"## Uploads

- Lost & found: up to 3 images per post, 5MB each
- Notes and messages: one attachment per post
- Accepted types: txt, pdf, png, jpg, jpeg, gif, doc, docx, ppt, pptx, xls, xlsx, mp4, avi, mov
- Requests are capped at 50MB"#;

const COMPLAINT: &str = r#"## Complaints

- Only admins can see who submitted a complaint
- You can delete your own complaints
- Admins mark complaints resolved or reopen them"#;

const COMMUNICATION: &str = r#"## Message board

- Post a message to everyone on campus
- Attach a document, image or video
- Delete your own messages at any time"#;

const NOTES: &str = r#"## Notes

- Public notes are visible to everyone
- Private notes are visible only to you
- Attach slides, PDFs or recordings"#;

const TEACHER: &str = r#"## Teacher directory

- Name, phone, branch, email and designation for each teacher
- Admins keep the directory up to date"#;

const STUDENT: &str = r#"## Student roster

- Each student has a name, branch, year and unique roll number
- Admins add, edit and remove students
- Attendance is recorded against the roster"#;

const FEATURES: &str = r#"## What this app does

1. Attendance tracking
2. Lost & found with image uploads
3. Anonymous complaint box
4. Campus message board
5. Notes sharing
6. Teacher directory
7. Student roster"#;

const COMMANDS: &str = r#"## Things to ask

- "mark attendance", "add student"
- "post lost item", "found keys"
- "submit complaint"
- "send message"
- "share notes"
- "show teachers"
- "help", "features", "who am i""#;
