mod s3_signer;
mod signer_factory;
mod supabase_signer;

pub use s3_signer::S3StorageSigner;
pub use signer_factory::StorageSignerFactory;
pub use supabase_signer::SupabaseStorageSigner;
