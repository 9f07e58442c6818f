pub mod resend_email_service;
