pub mod supabase_storage_service;
