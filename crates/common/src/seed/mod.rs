//! Initial data for a fresh deployment
//!
//! The fixture content the site ships with: navigation, keynote speakers,
//! conference topics, sponsors, sample announcements, sample papers,
//! sample registrations, and the two built-in accounts. Postgres
//! deployments insert these rows only when the tables are empty; the
//! in-memory store always starts from them.

use crate::auth;
use crate::errors::Result;
use crate::models::{
    Announcement, ConferenceTopic, KeynoteSpeaker, NavLink, PaperSubmission, PresentationStatus,
    Registration, ReviewStatus, SiteContent, Sponsor, UserRecord,
};

/// Everything a fresh store is populated with.
#[derive(Clone, Debug, Default)]
pub struct SeedData {
    pub users: Vec<UserRecord>,
    pub registrations: Vec<Registration>,
    pub announcements: Vec<Announcement>,
    pub papers: Vec<PaperSubmission>,
    pub site_content: Option<SiteContent>,
}

impl SeedData {
    /// Build the full initial dataset. Passwords are hashed here, so this
    /// does a little CPU work per user.
    pub fn initial() -> Result<Self> {
        Ok(Self {
            users: initial_users()?,
            registrations: initial_registrations(),
            announcements: initial_announcements(),
            papers: initial_papers(),
            site_content: Some(initial_site_content()),
        })
    }

    /// An empty dataset for tests that want a blank store.
    pub fn empty() -> Self {
        Self::default()
    }
}

fn initial_users() -> Result<Vec<UserRecord>> {
    Ok(vec![
        UserRecord {
            id: 1,
            username: "admin".to_string(),
            password_hash: auth::hash_password("password")?,
            role: "admin".to_string(),
            email: "admin1@email.com".to_string(),
        },
        UserRecord {
            id: 2,
            username: "user".to_string(),
            password_hash: auth::hash_password("password")?,
            role: "user".to_string(),
            email: "user1@email.com".to_string(),
        },
    ])
}

fn initial_registrations() -> Vec<Registration> {
    vec![
        Registration {
            id: 1,
            name: "Nguyễn Văn An".to_string(),
            organization: Some("Đại học Quốc gia".to_string()),
            email: "nva@email.com".to_string(),
            phone: Some("123456789".to_string()),
            with_paper: Some("yes".to_string()),
        },
        Registration {
            id: 2,
            name: "Trần Thị Bình".to_string(),
            organization: Some("Viện Khoa học Giáo dục".to_string()),
            email: "ttb@email.com".to_string(),
            phone: Some("123456789".to_string()),
            with_paper: Some("yes".to_string()),
        },
    ]
}

fn initial_announcements() -> Vec<Announcement> {
    vec![
        Announcement {
            id: 1,
            title: "Gia hạn thời gian nộp bài báo".to_string(),
            date: "15/08/2025".to_string(),
            content: "Do nhận được nhiều yêu cầu, ban tổ chức quyết định gia hạn thời gian nộp bài báo toàn văn đến hết ngày 30/09/2025. Vui lòng xem chi tiết tại trang Call for Papers.".to_string(),
            image_url: Some("https://picsum.photos/seed/announcement1/800/400".to_string()),
        },
        Announcement {
            id: 2,
            title: "Công bố danh sách diễn giả chính".to_string(),
            date: "01/08/2025".to_string(),
            content: "Chúng tôi vinh dự công bố danh sách các diễn giả chính sẽ tham gia hội thảo, bao gồm các chuyên gia hàng đầu trong và ngoài nước. Chi tiết về các diễn giả và chủ đề bài nói sẽ được cập nhật trong trang Chương trình.".to_string(),
            image_url: Some("https://picsum.photos/seed/announcement2/800/400".to_string()),
        },
        Announcement {
            id: 3,
            title: "Mở cổng đăng ký sớm với giá ưu đãi".to_string(),
            date: "15/07/2025".to_string(),
            content: "Cổng đăng ký tham dự hội thảo đã chính thức mở. Đăng ký sớm trước ngày 15/09/2025 để nhận được mức phí ưu đãi. Xin vui lòng truy cập trang Đăng ký để biết thêm chi tiết.".to_string(),
            image_url: Some("https://picsum.photos/seed/announcement3/800/400".to_string()),
        },
    ]
}

fn initial_papers() -> Vec<PaperSubmission> {
    vec![
        PaperSubmission {
            id: 1,
            author_name: "Nguyễn Văn An".to_string(),
            organization: "Đại học Quốc gia".to_string(),
            paper_title: "Ứng dụng AI trong đánh giá kết quả học tập".to_string(),
            topic: 3,
            abstract_status: ReviewStatus::Approved,
            full_text_status: ReviewStatus::Approved,
            review_status: ReviewStatus::Approved,
            presentation_status: PresentationStatus::Presenting,
            full_text_url: None,
            full_text_file_name: None,
        },
        PaperSubmission {
            id: 2,
            author_name: "Trần Thị Bình".to_string(),
            organization: "Viện Khoa học Giáo dục".to_string(),
            paper_title: "Mô hình Blended Learning cho giáo dục đại học".to_string(),
            topic: 2,
            abstract_status: ReviewStatus::Approved,
            full_text_status: ReviewStatus::Approved,
            review_status: ReviewStatus::Approved,
            presentation_status: PresentationStatus::Presenting,
            full_text_url: None,
            full_text_file_name: None,
        },
        PaperSubmission {
            id: 3,
            author_name: "Lê Văn Cường".to_string(),
            organization: "Đại học Sư phạm".to_string(),
            paper_title: "Tác động của STEM đến tư duy sáng tạo".to_string(),
            topic: 2,
            abstract_status: ReviewStatus::Approved,
            full_text_status: ReviewStatus::Pending,
            review_status: ReviewStatus::Pending,
            presentation_status: PresentationStatus::NotPresenting,
            full_text_url: None,
            full_text_file_name: None,
        },
    ]
}

fn initial_nav_links() -> Vec<NavLink> {
    let link = |id: i64, name: &str, path: &str| NavLink {
        id,
        name: name.to_string(),
        path: path.to_string(),
        children: None,
    };

    vec![
        link(1, "Trang chủ", "/"),
        link(2, "Giới thiệu", "/introduction"),
        link(3, "Chương trình", "/program"),
        link(4, "Thông báo", "/announcements"),
        link(5, "Đăng ký & Nộp bài", "/participation-guide"),
        link(6, "Kết quả duyệt bài", "/paper-review"),
        link(7, "Admin", "/admin"),
    ]
}

fn initial_keynote_speakers() -> Vec<KeynoteSpeaker> {
    vec![
        KeynoteSpeaker {
            id: 1,
            name: "GS. TS. Lê Minh Trí".to_string(),
            affiliation: "Đại học Quốc gia".to_string(),
            image_url: "https://picsum.photos/seed/speaker1/200/200".to_string(),
            bio: "Chuyên gia hàng đầu về trí tuệ nhân tạo trong giáo dục, với hơn 20 năm kinh nghiệm nghiên cứu và giảng dạy.".to_string(),
            keynote_topic: "AI và Tương lai của Việc học Cá nhân hóa".to_string(),
        },
        KeynoteSpeaker {
            id: 2,
            name: "PGS. TS. Trần Thị Bích".to_string(),
            affiliation: "Viện Khoa học Giáo dục".to_string(),
            image_url: "https://picsum.photos/seed/speaker2/200/200".to_string(),
            bio: "Tác giả của nhiều công trình nghiên cứu về đổi mới phương pháp giảng dạy và kiểm tra đánh giá.".to_string(),
            keynote_topic: "Đánh giá Năng lực: Từ Lý thuyết đến Thực tiễn".to_string(),
        },
        KeynoteSpeaker {
            id: 3,
            name: "Dr. John Williams".to_string(),
            affiliation: "Đại học Stanford".to_string(),
            image_url: "https://picsum.photos/seed/speaker3/200/200".to_string(),
            bio: "Nhà nghiên cứu tiên phong trong lĩnh vực công nghệ giáo dục và học tập kết hợp (blended learning).".to_string(),
            keynote_topic: "Xây dựng Hệ sinh thái Học tập Số".to_string(),
        },
    ]
}

fn initial_conference_topics() -> Vec<ConferenceTopic> {
    vec![
        ConferenceTopic {
            id: 1,
            title: "Bản sắc văn hoá trong kỷ nguyên số".to_string(),
            image_url: "https://picsum.photos/seed/culture-digital/800/600".to_string(),
            link: "/topic/1".to_string(),
            description: "Trong bối cảnh toàn cầu hóa và sự phát triển mạnh mẽ của công nghệ số, việc giữ gìn và phát huy bản sắc văn hóa dân tộc trở nên cấp thiết hơn bao giờ hết. Tiểu ban sẽ tập trung thảo luận về các giải pháp để văn hóa thực sự trở thành nền tảng tinh thần, động lực phát triển của xã hội, từ việc số hóa di sản, xây dựng các sản phẩm văn hóa số, đến việc giáo dục và nâng cao nhận thức cho thế hệ trẻ về giá trị văn hóa truyền thống.".to_string(),
        },
        ConferenceTopic {
            id: 2,
            title: "Giáo dục sáng tạo và phát triển bền vững trong kỷ nguyên số".to_string(),
            image_url: "https://picsum.photos/seed/education-creative/800/600".to_string(),
            link: "/topic/2".to_string(),
            description: "Kỷ nguyên số đòi hỏi một nền giáo dục không chỉ truyền thụ kiến thức mà còn phải khơi dậy tiềm năng sáng tạo, tư duy phản biện và khả năng thích ứng của người học. Tiểu ban này sẽ là diễn đàn để các chuyên gia chia sẻ các mô hình giáo dục tiên tiến, phương pháp giảng dạy đổi mới, và các chiến lược tích hợp công nghệ nhằm tạo ra một môi trường học tập linh hoạt, hiệu quả, hướng tới sự phát triển bền vững của cá nhân và xã hội.".to_string(),
        },
        ConferenceTopic {
            id: 3,
            title: "Trí tuệ nhân tạo trong bảo tồn, phát triển văn hoá và giáo dục".to_string(),
            image_url: "https://picsum.photos/seed/ai-future/800/600".to_string(),
            link: "/topic/3".to_string(),
            description: "Trí tuệ nhân tạo (AI) đang mở ra những cơ hội và thách thức chưa từng có cho các lĩnh vực văn hóa và giáo dục. Tiểu ban sẽ khám phá các ứng dụng của AI trong việc phân tích dữ liệu lớn để cá nhân hóa lộ trình học tập, tự động hóa các tác vụ quản lý, bảo tồn di sản văn hóa thông qua công nghệ 3D và thực tế ảo, cũng như thảo luận về các vấn đề đạo đức và chính sách cần thiết để đảm bảo việc ứng dụng AI một cách có trách nhiệm và hiệu quả.".to_string(),
        },
    ]
}

fn initial_sponsors() -> Vec<Sponsor> {
    vec![
        Sponsor {
            id: 1,
            name: "Báo Kinh tế - Đô thị".to_string(),
            logo_url: "https://picsum.photos/seed/sponsor1/150/60".to_string(),
        },
        Sponsor {
            id: 2,
            name: "Nhà xuất bản Hà Nội".to_string(),
            logo_url: "https://picsum.photos/seed/sponsor2/150/60".to_string(),
        },
    ]
}

fn initial_co_organizers() -> Vec<Sponsor> {
    vec![Sponsor {
        id: 1,
        name: "Tạp chí Giáo dục".to_string(),
        logo_url: "https://picsum.photos/seed/coorganizer1/150/60".to_string(),
    }]
}

/// The site document a fresh deployment starts with.
pub fn initial_site_content() -> SiteContent {
    SiteContent {
        conference_logo: "https://picsum.photos/seed/conflogo/60/60".to_string(),
        university_logo: "https://picsum.photos/seed/unilogo/60/60".to_string(),
        hero_background: "https://picsum.photos/seed/hero/1200/400".to_string(),
        call_for_papers_image: "https://picsum.photos/seed/a4-paper/842/1191".to_string(),
        keynote_speakers: initial_keynote_speakers(),
        conference_topics: initial_conference_topics(),
        sponsors: initial_sponsors(),
        co_organizers: initial_co_organizers(),
        nav_links: initial_nav_links(),
        hero_title: "Hội thảo quốc tế về nghiên cứu giáo dục".to_string(),
        hero_subtitle: "Cơ hội kết nối, chia sẻ và phát triển trong lĩnh vực giáo dục.".to_string(),
        conference_date: "08-09/11/2025".to_string(),
        conference_location: "Hà Nội, Việt Nam".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_dataset_shape() {
        let data = SeedData::initial().unwrap();

        assert_eq!(data.users.len(), 2);
        assert_eq!(data.registrations.len(), 2);
        assert_eq!(data.announcements.len(), 3);
        assert_eq!(data.papers.len(), 3);

        let content = data.site_content.unwrap();
        assert_eq!(content.nav_links.len(), 7);
        assert_eq!(content.conference_topics.len(), 3);
        assert_eq!(content.keynote_speakers.len(), 3);
        assert_eq!(content.sponsors.len(), 2);
        assert_eq!(content.co_organizers.len(), 1);
    }

    #[test]
    fn test_built_in_accounts_verify() {
        let data = SeedData::initial().unwrap();
        let admin = &data.users[0];

        assert_eq!(admin.username, "admin");
        assert_eq!(admin.role, "admin");
        assert!(crate::auth::verify_password("password", &admin.password_hash));
    }

    #[test]
    fn test_third_paper_is_still_under_review() {
        let papers = initial_papers();
        let paper = &papers[2];

        assert_eq!(paper.abstract_status, ReviewStatus::Approved);
        assert_eq!(paper.full_text_status, ReviewStatus::Pending);
        assert_eq!(paper.review_status, ReviewStatus::Pending);
        assert_eq!(paper.presentation_status, PresentationStatus::NotPresenting);
        assert!(paper.full_text_url.is_none());
    }
}
