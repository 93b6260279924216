mod supabase_signer_test;
mod s3_signer_test;
