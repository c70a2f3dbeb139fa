//! Private subnet in the default VPC

use super::name_tags;
use resgraph::Declaration;

pub const KIND: &str = "aws:ec2:Subnet";

/// A private subnet holding one of the cluster's instances
#[derive(Debug, Clone)]
pub struct Subnet {
    /// Logical name, e.g. `demo-private-subnet-1`
    pub logical_name: String,
    pub vpc_id: String,
    pub cidr_block: String,
    pub availability_zone: String,
    /// Value of the `Name` tag
    pub tag_name: String,
}

impl Subnet {
    pub fn declaration(self) -> Declaration {
        Declaration::new(KIND, self.logical_name)
            .prop("vpcId", self.vpc_id)
            .prop("cidrBlock", self.cidr_block)
            .prop("availabilityZone", self.availability_zone)
            .prop("tags", name_tags(&self.tag_name))
    }
}
