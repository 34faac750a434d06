pub mod fetch_user_repositories;
