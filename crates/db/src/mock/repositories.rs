use chrono::{DateTime, Utc};
use mockall::mock;
use uuid::Uuid;

use crate::models::{DbMentorshipRequest, DbProfile, DbSession, DbUser};

// Mock repositories for testing
mock! {
    pub UserRepo {
        pub async fn create_user(
            &self,
            email: String,
            password_hash: String,
        ) -> eyre::Result<Option<DbUser>>;

        pub async fn get_user_by_email(
            &self,
            email: String,
        ) -> eyre::Result<Option<DbUser>>;

        pub async fn get_user_by_id(
            &self,
            id: Uuid,
        ) -> eyre::Result<Option<DbUser>>;
    }
}

mock! {
    pub ProfileRepo {
        pub async fn create_profile(
            &self,
            user_id: Uuid,
            name: String,
            role: String,
            industries: Vec<String>,
            about: Option<String>,
        ) -> eyre::Result<Option<DbProfile>>;

        pub async fn get_profile_by_user_id(
            &self,
            user_id: Uuid,
        ) -> eyre::Result<Option<DbProfile>>;

        pub async fn get_profile_by_id(
            &self,
            id: Uuid,
        ) -> eyre::Result<Option<DbProfile>>;

        pub async fn get_profile_by_id_and_role(
            &self,
            id: Uuid,
            role: String,
        ) -> eyre::Result<Option<DbProfile>>;

        pub async fn update_profile(
            &self,
            id: Uuid,
            name: String,
            role: String,
            industries: Vec<String>,
            about: Option<String>,
        ) -> eyre::Result<Option<DbProfile>>;

        pub async fn get_profiles_by_role(
            &self,
            role: String,
        ) -> eyre::Result<Vec<DbProfile>>;
    }
}

mock! {
    pub MentorshipRepo {
        pub async fn create_request(
            &self,
            mentee_id: Uuid,
            mentor_id: Uuid,
            proposal: String,
            preferred_time: DateTime<Utc>,
        ) -> eyre::Result<Option<DbMentorshipRequest>>;

        pub async fn get_request_by_id(
            &self,
            id: Uuid,
        ) -> eyre::Result<Option<DbMentorshipRequest>>;

        pub async fn get_requests_by_mentee(
            &self,
            mentee_id: Uuid,
        ) -> eyre::Result<Vec<DbMentorshipRequest>>;

        pub async fn get_requests_by_mentor(
            &self,
            mentor_id: Uuid,
        ) -> eyre::Result<Vec<DbMentorshipRequest>>;

        pub async fn update_request_status(
            &self,
            id: Uuid,
            status: String,
        ) -> eyre::Result<Option<DbMentorshipRequest>>;

        pub async fn delete_request_if_pending(
            &self,
            id: Uuid,
        ) -> eyre::Result<bool>;

        pub async fn has_active_requests(
            &self,
            profile_id: Uuid,
        ) -> eyre::Result<bool>;
    }
}

mock! {
    pub SessionRepo {
        pub async fn create_session(
            &self,
            request_id: Uuid,
            meeting_link: String,
            scheduled_time: DateTime<Utc>,
        ) -> eyre::Result<Option<DbSession>>;

        pub async fn get_session_by_id(
            &self,
            id: Uuid,
        ) -> eyre::Result<Option<DbSession>>;

        pub async fn get_sessions_by_mentee(
            &self,
            mentee_id: Uuid,
        ) -> eyre::Result<Vec<DbSession>>;

        pub async fn get_sessions_by_mentor(
            &self,
            mentor_id: Uuid,
        ) -> eyre::Result<Vec<DbSession>>;

        pub async fn update_session(
            &self,
            id: Uuid,
            meeting_link: String,
            scheduled_time: DateTime<Utc>,
        ) -> eyre::Result<Option<DbSession>>;

        pub async fn update_session_status(
            &self,
            id: Uuid,
            status: String,
        ) -> eyre::Result<Option<DbSession>>;

        pub async fn delete_session(
            &self,
            id: Uuid,
        ) -> eyre::Result<bool>;
    }
}
